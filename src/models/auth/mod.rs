pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::Identity;
pub use requests::LoginRequest;
pub use responses::LoginResponse;
