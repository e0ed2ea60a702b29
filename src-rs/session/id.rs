use rand::{distributions::Alphanumeric, Rng};

pub(crate) fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

pub fn generate_board_id() -> String {
    format!("board_{}_{}", now_ms(), random_suffix(8))
}

pub fn generate_request_id() -> String {
    format!("req_{}_{}", now_ms(), random_suffix(10))
}
