pub mod math;
pub mod test_networks;
