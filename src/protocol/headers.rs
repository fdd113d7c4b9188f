//! Frame headers and the STOMP header vocabulary.

/// `receipt` - asks the broker to confirm a frame.
pub const RECEIPT: &str = "receipt";
/// `destination` - queue or topic a frame targets.
pub const DESTINATION: &str = "destination";
/// `id` - client-chosen subscription id.
pub const ID: &str = "id";
/// `content-length` - body length in UTF-8 bytes.
pub const CONTENT_LENGTH: &str = "content-length";
/// `content-type` - MIME type of the body.
pub const CONTENT_TYPE: &str = "content-type";
/// `ack` - acknowledgement mode of a subscription.
pub const ACK: &str = "ack";
/// `transaction` - transaction label.
pub const TRANSACTION: &str = "transaction";
/// `message-id` - id of the message being acknowledged.
pub const MESSAGE_ID: &str = "message-id";
/// `subscription` - subscription a message or ack belongs to.
pub const SUBSCRIPTION: &str = "subscription";
/// `disconnected` - client timestamp sent with DISCONNECT.
pub const DISCONNECTED: &str = "disconnected";
/// `heart-beat` - heartbeat intervals offered on CONNECT.
pub const HEART_BEAT: &str = "heart-beat";
/// `accept-version` - protocol versions offered on CONNECT.
pub const ACCEPT_VERSION: &str = "accept-version";
/// `login` - user name offered on CONNECT.
pub const LOGIN: &str = "login";
/// `passcode` - password offered on CONNECT.
pub const PASSCODE: &str = "passcode";

/// `session` - session id assigned on CONNECTED.
pub const SESSION: &str = "session";
/// `receipt-id` - id echoed back on RECEIPT.
pub const RECEIPT_ID: &str = "receipt-id";
/// `message` - short error description on ERROR.
pub const MESSAGE: &str = "message";

/// `text/plain` - default content type of SEND frames.
pub const TEXT_PLAIN: &str = "text/plain";
/// Content type used for JSON bodies.
pub const APPLICATION_JSON: &str = "application/json;charset=UTF-8";

/// Ordered header mapping with unique keys.
///
/// Keys keep the position of their first insertion; re-inserting a key
/// replaces its value in place. Wire order is iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a header, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Insert a header only if `key` is not present yet.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, value.into()));
        }
    }

    /// Look up a header value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a header, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every header of `other` into `self`, replacing existing keys.
    pub fn extend_from(&mut self, other: &Headers) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Iterate over `(key, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (key, value) in iter {
            headers.insert(key, value);
        }
        headers
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut headers = Headers::new();
        headers.insert("b", "2");
        headers.insert("a", "1");
        headers.insert("c", "3");

        let keys: Vec<_> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut headers = Headers::from([("a", "1"), ("b", "2")]);
        let old = headers.insert("a", "9");

        assert_eq!(old.as_deref(), Some("1"));
        assert_eq!(headers.len(), 2);
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs, [("a", "9"), ("b", "2")]);
    }

    #[test]
    fn test_insert_if_absent() {
        let mut headers = Headers::from([(CONTENT_TYPE, APPLICATION_JSON)]);
        headers.insert_if_absent(CONTENT_TYPE, TEXT_PLAIN);
        headers.insert_if_absent(RECEIPT, "r-1");

        assert_eq!(headers.get(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(headers.get(RECEIPT), Some("r-1"));
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::from([("a", "1"), ("b", "2")]);
        assert_eq!(headers.remove("a").as_deref(), Some("1"));
        assert_eq!(headers.remove("a"), None);
        assert!(!headers.contains_key("a"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let headers = Headers::from([("Content-Type", "text/plain")]);
        assert_eq!(headers.get(CONTENT_TYPE), None);
    }

    #[test]
    fn test_extend_from() {
        let mut headers = Headers::from([("a", "1")]);
        headers.extend_from(&Headers::from([("a", "2"), ("b", "3")]));
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs, [("a", "2"), ("b", "3")]);
    }

    #[test]
    fn test_empty() {
        let headers = Headers::default();
        assert!(headers.is_empty());
        assert_eq!(headers.iter().count(), 0);
    }
}
