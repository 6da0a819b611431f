mod file_user_repository;

pub use file_user_repository::FileUserRepository;
