use nusantara_core::model::UserId;
use tokio::sync::watch;

/// An already-identified user, as handed over by the external identity
/// provider. Token refresh and session persistence stay outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthUser {
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            full_name,
        }
    }
}

/// Shared sign-in state with an explicit subscription lifecycle.
///
/// Components receive an `AuthSession` at construction and call
/// [`AuthSession::subscribe`] while mounted; dropping the returned
/// [`AuthSubscription`] ends delivery. There is no ambient global: every
/// consumer holds its own handle.
#[derive(Debug, Clone)]
pub struct AuthSession {
    tx: watch::Sender<Option<AuthUser>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Creates a session that starts signed in, for tests and tools.
    #[must_use]
    pub fn signed_in(user: AuthUser) -> Self {
        let (tx, _rx) = watch::channel(Some(user));
        Self { tx }
    }

    /// Marks the user as signed in and notifies subscribers.
    pub fn sign_in(&self, user: AuthUser) {
        self.tx.send_replace(Some(user));
    }

    /// Clears the current user and notifies subscribers.
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// Snapshot of the current user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }

    /// Convenience accessor for the current user's id.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        self.tx.borrow().as_ref().map(|user| user.id)
    }

    /// Registers a subscriber. Delivery stops when the handle is dropped.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// A live subscription to auth-state changes.
///
/// Tie the lifetime of this handle to the consuming component: create it on
/// mount, drop it on unmount.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: watch::Receiver<Option<AuthUser>>,
}

impl AuthSubscription {
    /// Waits until the auth state changes and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `AuthSessionClosed` if the owning [`AuthSession`] was dropped.
    pub async fn changed(&mut self) -> Result<Option<AuthUser>, AuthSessionClosed> {
        self.rx.changed().await.map_err(|_| AuthSessionClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Snapshot of the value at the subscription's current position.
    #[must_use]
    pub fn current(&self) -> Option<AuthUser> {
        self.rx.borrow().clone()
    }
}

/// The auth session was dropped while a subscriber was waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSessionClosed;

impl std::fmt::Display for AuthSessionClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "auth session closed")
    }
}

impl std::error::Error for AuthSessionClosed {}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser::new(UserId::random(), "siti@example.com", Some("Siti".into()))
    }

    #[tokio::test]
    async fn subscribers_see_sign_in_and_sign_out() {
        let session = AuthSession::new();
        let mut sub = session.subscribe();
        assert_eq!(sub.current(), None);

        let siti = user();
        session.sign_in(siti.clone());
        assert_eq!(sub.changed().await.unwrap(), Some(siti));

        session.sign_out();
        assert_eq!(sub.changed().await.unwrap(), None);
    }

    #[tokio::test]
    async fn current_user_reflects_latest_state() {
        let session = AuthSession::new();
        assert!(session.current_user().is_none());

        let siti = user();
        session.sign_in(siti.clone());
        assert_eq!(session.current_user_id(), Some(siti.id));
    }

    #[tokio::test]
    async fn dropped_subscription_does_not_block_sign_in() {
        let session = AuthSession::new();
        let sub = session.subscribe();
        drop(sub);
        session.sign_in(user());
        assert!(session.current_user().is_some());
    }
}
