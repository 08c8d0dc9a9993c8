//! Submitted form payloads and their validation chains.
//!
//! Every form is normalized first (trimming, lower-casing) and then checked
//! with `validator`. A failed check reports every failing field at once, with
//! the first message per field, plus the submitted values so the form can be
//! re-populated. Passwords are never trimmed and never echoed back.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::constants::is_valid_role;
use crate::product::{Product, ProductDraft};
use crate::user::UserRole;

/// Field-keyed validation failures plus the values to re-populate the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub errors: BTreeMap<String, String>,
    pub old: BTreeMap<String, String>,
}

impl FormErrors {
    /// Single-field failure.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(name.into(), message.into());
        Self {
            errors,
            old: BTreeMap::new(),
        }
    }

    pub fn with_old(mut self, old: BTreeMap<String, String>) -> Self {
        self.old = old;
        self
    }

    /// Message for a field, if it failed.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Submitted value for a field, empty when absent.
    pub fn old_value(&self, field: &str) -> &str {
        self.old.get(field).map(String::as_str).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn collect(errors: &ValidationErrors, old: BTreeMap<String, String>) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, failures)| {
                failures.first().map(|failure| {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        Self { errors, old }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// A raw form that normalizes and validates into a typed value.
pub trait Submission {
    type Valid;

    fn check(self) -> Result<Self::Valid, FormErrors>;
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "Introduce un email válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub pass: String,
}

/// Normalized login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Submission for LoginForm {
    type Valid = Credentials;

    fn check(mut self) -> Result<Credentials, FormErrors> {
        self.email = self.email.trim().to_lowercase();

        if let Err(errors) = self.validate() {
            let mut old = BTreeMap::new();
            old.insert("email".to_string(), self.email);
            return Err(FormErrors::collect(&errors, old));
        }

        Ok(Credentials {
            email: self.email,
            password: self.pass,
        })
    }
}

// =============================================================================
// Registration
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(custom(function = "validate_registrant_email"))]
    pub user: String,
    #[validate(length(min = 2, message = "El nombre debe tener al menos 2 caracteres"))]
    pub name: String,
    #[validate(length(min = 2, message = "Los apellidos deben tener al menos 2 caracteres"))]
    pub apellidos: String,
    #[validate(custom(function = "validate_role"))]
    pub rol: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub pass: String,
}

/// Normalized registration input. The email is lower-cased.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: UserRole,
    pub password: String,
}

impl Registration {
    /// Values to re-populate the registration form, password excluded.
    pub fn old_values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("user".to_string(), self.email.clone()),
            ("name".to_string(), self.name.clone()),
            ("apellidos".to_string(), self.surname.clone()),
            ("rol".to_string(), self.role.to_string()),
        ])
    }
}

impl RegisterForm {
    fn old_values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("user".to_string(), self.user.clone()),
            ("name".to_string(), self.name.clone()),
            ("apellidos".to_string(), self.apellidos.clone()),
            ("rol".to_string(), self.rol.clone()),
        ])
    }
}

impl Submission for RegisterForm {
    type Valid = Registration;

    fn check(mut self) -> Result<Registration, FormErrors> {
        self.user = self.user.trim().to_string();
        self.name = self.name.trim().to_string();
        self.apellidos = self.apellidos.trim().to_string();

        if let Err(errors) = self.validate() {
            return Err(FormErrors::collect(&errors, self.old_values()));
        }

        let old = self.old_values();
        let role = self.rol.parse::<UserRole>().map_err(|_| {
            FormErrors::field("rol", "Rol inválido").with_old(old)
        })?;

        Ok(Registration {
            email: self.user.to_lowercase(),
            name: self.name,
            surname: self.apellidos,
            role,
            password: self.pass,
        })
    }
}

/// Stops at the first failing rule: presence, `@`, then full syntax with a TLD.
fn validate_registrant_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure("required", "El email es obligatorio"));
    }
    if !value.contains('@') {
        return Err(failure("missing_at", "El email debe contener @"));
    }
    if !value.validate_email() || !has_tld(value) {
        return Err(failure(
            "email",
            "Introduce un email válido (ej: usuario@dominio.com)",
        ));
    }
    Ok(())
}

fn has_tld(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    if is_valid_role(value) {
        Ok(())
    } else {
        Err(failure("role", "Rol inválido"))
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product fields as submitted. Numbers arrive as text and are parsed here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProductForm {
    #[validate(length(min = 2, message = "El nombre debe tener al menos 2 caracteres"))]
    pub nombre: String,
    #[validate(length(max = 500, message = "La descripción no puede superar 500 caracteres"))]
    pub descripcion: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub precio: String,
    #[validate(custom(function = "validate_stock"))]
    pub stock: String,
}

impl ProductForm {
    /// Prefill values for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            nombre: product.name.clone(),
            descripcion: product.description.clone(),
            precio: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }

    pub fn old_values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("nombre".to_string(), self.nombre.clone()),
            (
                "descripcion".to_string(),
                self.descripcion.clone().unwrap_or_default(),
            ),
            ("precio".to_string(), self.precio.clone()),
            ("stock".to_string(), self.stock.clone()),
        ])
    }
}

impl Submission for ProductForm {
    type Valid = ProductDraft;

    fn check(mut self) -> Result<ProductDraft, FormErrors> {
        self.nombre = self.nombre.trim().to_string();
        self.descripcion = self
            .descripcion
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.precio = self.precio.trim().to_string();
        self.stock = self.stock.trim().to_string();

        if let Err(errors) = self.validate() {
            return Err(FormErrors::collect(&errors, self.old_values()));
        }

        let (Some(price), Some(stock)) = (parse_price(&self.precio), parse_stock(&self.stock))
        else {
            return Err(FormErrors::field("precio", "El precio debe ser un número ≥ 0")
                .with_old(self.old_values()));
        };

        Ok(ProductDraft {
            name: self.nombre,
            description: self.descripcion,
            price,
            stock,
        })
    }
}

fn parse_price(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn parse_stock(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().filter(|stock| *stock >= 0)
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    parse_price(value)
        .map(|_| ())
        .ok_or_else(|| failure("price", "El precio debe ser un número ≥ 0"))
}

fn validate_stock(value: &str) -> Result<(), ValidationError> {
    parse_stock(value)
        .map(|_| ())
        .ok_or_else(|| failure("stock", "El stock debe ser un entero ≥ 0"))
}
