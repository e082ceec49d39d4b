#[derive(Debug, Clone)]
pub struct ChallengeSettings {
    pub max_fibonacci_index: i64,
    pub max_input_length: usize,
    pub max_list_size: usize,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            max_fibonacci_index: 1000,
            max_input_length: 1000,
            max_list_size: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub challenge: ChallengeSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            challenge: ChallengeSettings::default(),
        }
    }
}

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "challenge_platform.db".to_string())
}
