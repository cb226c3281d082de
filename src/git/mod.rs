pub mod backend;
pub mod command;
pub mod repo;

pub use backend::VcsBackend;
pub use command::GitCli;
pub use repo::GitRepo;
