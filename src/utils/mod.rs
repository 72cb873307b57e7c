pub mod constants;
pub mod get_env;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_server;
