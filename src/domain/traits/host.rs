use crate::application::errors::HostError;

/// The application the bootstrap hands control to once mods are mounted
pub trait HostApplication {
    /// Run the host with the original process arguments, returning its exit code
    fn launch(&self, args: &[String]) -> Result<i32, HostError>;
}
