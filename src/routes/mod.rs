pub mod achievements;
pub mod assignments;
pub mod auth;

pub mod classes;
pub mod materials;

pub use achievements::configure_achievements_routes;
pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use materials::configure_materials_routes;
