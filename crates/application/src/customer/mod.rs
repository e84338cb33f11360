//! Customer use cases.

mod create;
mod delete;
mod get;
mod update;

pub use create::CreateCustomer;
pub use delete::DeleteCustomer;
pub use get::GetCustomer;
pub use update::UpdateCustomerProfile;
