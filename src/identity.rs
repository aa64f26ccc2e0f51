// Identity supplies the key of the signed-in user.
// It is consulted on every call, so signing in or out takes effect immediately.
// Implementations must be cheap and must not do network I/O.
pub trait Identity {
    fn user_key(&self) -> Option<String>;
}

// A fixed identity. None means nobody is signed in.
impl Identity for Option<String> {
    fn user_key(&self) -> Option<String> {
        self.clone()
    }
}

impl<F: Fn() -> Option<String>> Identity for F {
    fn user_key(&self) -> Option<String> {
        self()
    }
}

// EnvIdentity reads the user key from an environment variable each time it
// is asked, falling back to a configured key.
// Empty values count as signed out.
#[derive(Debug, Clone)]
pub struct EnvIdentity {
    var: String,
    fallback: Option<String>,
}

impl EnvIdentity {
    pub const DEFAULT_VAR: &'static str = "DIARY_USER";

    pub fn new(var: impl Into<String>, fallback: Option<String>) -> Self {
        Self {
            var: var.into(),
            fallback,
        }
    }
}

impl Identity for EnvIdentity {
    fn user_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .or_else(|| self.fallback.clone())
            .filter(|key| !key.trim().is_empty())
    }
}

#[test]
fn test_fixed_identity() {
    assert_eq!(Some("42".to_string()).user_key(), Some("42".into()));
    assert_eq!(None::<String>.user_key(), None);
}

#[test]
#[serial_test::serial]
fn test_env_identity_is_read_per_call() {
    let var = "DIARY_TEST_IDENTITY_PER_CALL";
    let identity = EnvIdentity::new(var, None);
    std::env::remove_var(var);
    assert_eq!(identity.user_key(), None);

    std::env::set_var(var, "7");
    assert_eq!(identity.user_key(), Some("7".into()));

    std::env::set_var(var, "");
    assert_eq!(identity.user_key(), None);
    std::env::remove_var(var);
}

#[test]
#[serial_test::serial]
fn test_env_identity_fallback() {
    let var = "DIARY_TEST_IDENTITY_FALLBACK";
    std::env::remove_var(var);
    let identity = EnvIdentity::new(var, Some("11".into()));
    assert_eq!(identity.user_key(), Some("11".into()));

    std::env::set_var(var, "12");
    assert_eq!(identity.user_key(), Some("12".into()));
    std::env::remove_var(var);
}
