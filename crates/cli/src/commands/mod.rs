pub mod init;
pub mod root;
pub mod run;

pub use init::init_command;
pub use root::root_command;
pub use run::run_command;
