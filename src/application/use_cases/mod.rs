/// Use cases module containing application business logic orchestration
mod find_culprits;

pub use find_culprits::FindCulpritsUseCase;
