pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod users;

#[cfg(test)]
pub mod test_support;
