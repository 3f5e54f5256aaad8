//! Login identities read from the environment at startup.
//!
//! Two fixed records (admin and guest) plus a skip-login flag, immutable for
//! the life of the process. Absent variables fall back to built-in defaults
//! and are recorded so the login page can warn about them instead of
//! failing hard.

/// The two roles the login gate recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Admin => "Admin",
        }
    }
}

/// One username/password pair and the role it grants.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub admin: Identity,
    pub guest: Identity,
    /// When set, a fresh session auto-authenticates as the guest identity.
    pub skip_login: bool,
    /// Environment variables that were absent and fell back to defaults.
    pub missing: Vec<&'static str>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the credential records from an injected lookup so tests do not
    /// have to mutate the process environment. Empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut missing = Vec::new();
        let mut read = |name: &'static str, default: &str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                default.to_string()
            }
        };

        let admin = Identity {
            username: read("ADMIN_USER_NAME", "admin"),
            password: read("ADMIN_PASSWORD", "admin"),
            role: Role::Admin,
        };
        let guest = Identity {
            username: read("GUEST_USER_NAME", "guest"),
            password: read("GUEST_PASSWORD", "guest"),
            role: Role::Guest,
        };
        let skip_login = lookup("SKIP_LOGIN")
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Credentials {
            admin,
            guest,
            skip_login,
            missing,
        }
    }

    /// Match a username/password pair against both identity records.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&Identity> {
        [&self.guest, &self.admin]
            .into_iter()
            .find(|identity| identity.username == username && identity.password == password)
    }
}
