pub mod test_popen;
pub mod test_registry;
