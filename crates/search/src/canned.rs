use std::collections::HashMap;

const BUILTIN_REPLIES: &[(&str, &str)] = &[
    ("hi", "Hello! How can I assist you today?"),
    ("hello", "Hi there! How can I help you?"),
    ("good morning", "Good morning! What can I do for you today?"),
    ("good afternoon", "Good afternoon! How can I assist you?"),
    ("good evening", "Good evening! How can I help you?"),
    ("how are you", "I'm just a bot, but I'm here to help you!"),
    (
        "what is your name",
        "I'm a chatbot designed to assist you with queries related to the Department of Justice.",
    ),
];

/// Fixed replies keyed by canonical phrase, consulted before any corpus search
#[derive(Debug, Clone)]
pub struct CannedResponses {
    replies: HashMap<String, String>,
}

impl CannedResponses {
    /// The built-in greeting table
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_REPLIES.iter().copied())
    }

    /// Build a table; keys are canonicalized on the way in
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let replies = pairs
            .into_iter()
            .map(|(key, reply)| (canonicalize(key.as_ref()), reply.into()))
            .collect();
        Self { replies }
    }

    /// Reply for an already canonical query
    pub fn lookup(&self, canonical: &str) -> Option<&str> {
        self.replies.get(canonical).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Default for CannedResponses {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lower-case and trim a raw query
pub fn canonicalize(query: &str) -> String {
    query.trim().to_lowercase()
}
