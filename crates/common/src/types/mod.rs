use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Success envelope shared by every JSON endpoint: `{message, count?, data}`.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self { message: "Success", count: None, data }
    }

    pub fn collection(data: T, count: usize) -> Self {
        Self { message: "Success", count: Some(count), data }
    }
}

/// Error body: only the message is exposed.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}
