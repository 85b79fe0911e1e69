use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement body returned by mutating endpoints.
#[derive(Serialize, Deserialize, Debug)]
pub struct Ack {
    pub success: bool,
}
