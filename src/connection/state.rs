//! STOMP session state machine.

/// STOMP session state.
///
/// ```text
/// Disconnected --connect--> Connecting --CONNECTED--> Connected
///      ^                                                  |
///      |                                             disconnect
///      |                                                  v
///      +-------------- transport closed/error ------ Disconnecting
/// ```
///
/// Any state falls back to `Disconnected` when the transport closes or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ConnectionState {
    /// No transport, or the transport has closed.
    #[default]
    Disconnected,
    /// Transport open requested; `CONNECTED` not received yet.
    Connecting,
    /// `CONNECTED` received.
    Connected,
    /// `DISCONNECT` sent; waiting for the transport to close.
    Disconnecting,
}

impl ConnectionState {
    /// Check if a session is being established or is established.
    #[must_use]
    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Connected)
    }

    /// Check if the broker has accepted the session.
    #[must_use]
    #[inline]
    pub const fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Check if `DISCONNECT` may be sent from this state.
    #[must_use]
    #[inline]
    pub const fn can_disconnect(&self) -> bool {
        self.is_active()
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Disconnecting => write!(f, "Disconnecting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_is_active() {
        assert!(!ConnectionState::Disconnected.is_active());
        assert!(ConnectionState::Connecting.is_active());
        assert!(ConnectionState::Connected.is_active());
        assert!(!ConnectionState::Disconnecting.is_active());
    }

    #[test]
    fn test_is_connected() {
        assert!(!ConnectionState::Connecting.is_connected());
        assert!(ConnectionState::Connected.is_connected());
    }

    #[test]
    fn test_can_disconnect() {
        assert!(!ConnectionState::Disconnected.can_disconnect());
        assert!(ConnectionState::Connecting.can_disconnect());
        assert!(ConnectionState::Connected.can_disconnect());
        assert!(!ConnectionState::Disconnecting.can_disconnect());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Disconnected.to_string(), "Disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "Connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "Connected");
        assert_eq!(ConnectionState::Disconnecting.to_string(), "Disconnecting");
    }
}
