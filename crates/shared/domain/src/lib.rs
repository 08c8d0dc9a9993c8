//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users and roles, catalog products, the session authentication state,
//! password hashing and the validation chains for every submitted form.

pub mod constants;
pub mod error;
pub mod forms;
pub mod password;
pub mod product;
pub mod session;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use forms::{
    Credentials, FormErrors, LoginForm, ProductForm, RegisterForm, Registration, Submission,
};
pub use password::Password;
pub use product::{Product, ProductDraft};
pub use session::{AuthState, Identity, SessionId};
pub use user::{NewUser, User, UserResponse, UserRole};
