//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use std::collections::BTreeMap;
use std::fmt::Write;

use axum::response::Html;

use domain::{AuthState, FormErrors, Identity, Product, UserRole};

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    ))
}

fn notice(text: &str, class: &str) -> String {
    format!("<p class=\"{}\">{}</p>", class, escape(text))
}

fn field(label: &str, name: &str, kind: &str, value: &str, error: Option<&str>) -> String {
    let mut html = format!(
        "<label>{}<input type=\"{}\" name=\"{}\" value=\"{}\"></label>",
        escape(label),
        kind,
        name,
        escape(value)
    );
    if let Some(error) = error {
        let _ = write!(html, "<span class=\"error\">{}</span>", escape(error));
    }
    html.push('\n');
    html
}

fn old<'a>(errors: Option<&'a FormErrors>, name: &str) -> &'a str {
    errors.map(|e| e.old_value(name)).unwrap_or_default()
}

fn error<'a>(errors: Option<&'a FormErrors>, name: &str) -> Option<&'a str> {
    errors.and_then(|e| e.message(name))
}

pub fn home(state: &AuthState) -> Html<String> {
    let mut body = format!("<p>Hola, {}</p>\n", escape(state.display_name()));
    match state.role() {
        Some(role) => {
            let _ = write!(
                body,
                "<a href=\"/{}\">Panel</a> <a href=\"/productos\">Productos</a> <a href=\"/logout\">Salir</a>",
                role
            );
        }
        None => body.push_str("<a href=\"/login\">Entrar</a> <a href=\"/registro\">Registro</a>"),
    }
    page("Inicio", &body)
}

/// Login form. `message` is the single generic failure text, if any.
pub fn login(errors: Option<&FormErrors>, message: Option<&str>) -> Html<String> {
    let mut body = String::new();
    if let Some(message) = message {
        body.push_str(&notice(message, "error"));
    }
    body.push_str("<form method=\"post\" action=\"/auth\">\n");
    body.push_str(&field("Email", "email", "email", old(errors, "email"), error(errors, "email")));
    body.push_str(&field("Contraseña", "pass", "password", "", error(errors, "pass")));
    body.push_str("<button type=\"submit\">Entrar</button>\n</form>");
    page("Login", &body)
}

/// Registration form, optionally with a success or failure notice.
pub fn register(errors: Option<&FormErrors>, message: Option<&str>) -> Html<String> {
    let mut body = String::new();
    if let Some(message) = message {
        body.push_str(&notice(message, "notice"));
    }
    body.push_str("<form method=\"post\" action=\"/register\">\n");
    body.push_str(&field("Email", "user", "email", old(errors, "user"), error(errors, "user")));
    body.push_str(&field("Nombre", "name", "text", old(errors, "name"), error(errors, "name")));
    body.push_str(&field(
        "Apellidos",
        "apellidos",
        "text",
        old(errors, "apellidos"),
        error(errors, "apellidos"),
    ));

    let selected = old(errors, "rol");
    body.push_str("<label>Rol<select name=\"rol\">");
    for role in [UserRole::Admin, UserRole::Editor] {
        let mark = if selected == role.as_str() { " selected" } else { "" };
        let _ = write!(body, "<option value=\"{}\"{}>{}</option>", role, mark, role);
    }
    body.push_str("</select></label>\n");
    if let Some(message) = error(errors, "rol") {
        let _ = write!(body, "<span class=\"error\">{}</span>\n", escape(message));
    }

    body.push_str(&field("Contraseña", "pass", "password", "", error(errors, "pass")));
    body.push_str("<button type=\"submit\">Registrar</button>\n</form>");
    page("Registro", &body)
}

/// Role landing page (`/admin`, `/editor`).
pub fn dashboard(identity: &Identity) -> Html<String> {
    let title = match identity.role {
        UserRole::Admin => "Panel de administración",
        UserRole::Editor => "Panel de edición",
    };
    let body = format!(
        "<p>Bienvenido, {}</p>\n<a href=\"/productos\">Productos</a> <a href=\"/logout\">Salir</a>",
        escape(&identity.display_name)
    );
    page(title, &body)
}

/// Product table. Management links only for admins.
pub fn product_list(products: &[Product], state: &AuthState) -> Html<String> {
    let can_manage = state.role() == Some(UserRole::Admin);
    let mut body = String::new();
    if can_manage {
        body.push_str("<a href=\"/productos/nuevo\">Nuevo producto</a>\n");
    }
    body.push_str("<table>\n<tr><th>Nombre</th><th>Descripción</th><th>Precio</th><th>Stock</th></tr>\n");
    for product in products {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td>",
            escape(&product.name),
            escape(product.description.as_deref().unwrap_or_default()),
            product.price,
            product.stock
        );
        if can_manage {
            let _ = write!(
                body,
                "<td><a href=\"/productos/{id}/editar\">Editar</a><form method=\"post\" action=\"/productos/{id}/borrar\"><button type=\"submit\">Borrar</button></form></td>",
                id = product.id
            );
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>");
    page("Productos", &body)
}

/// Create/edit product form. `values` pre-fills the inputs.
pub fn product_form(
    title: &str,
    action: &str,
    values: &BTreeMap<String, String>,
    errors: Option<&FormErrors>,
) -> Html<String> {
    let value = |name: &str| values.get(name).map(String::as_str).unwrap_or_default();

    let mut body = format!("<form method=\"post\" action=\"{}\">\n", escape(action));
    body.push_str(&field("Nombre", "nombre", "text", value("nombre"), error(errors, "nombre")));
    body.push_str(&field(
        "Descripción",
        "descripcion",
        "text",
        value("descripcion"),
        error(errors, "descripcion"),
    ));
    body.push_str(&field("Precio", "precio", "text", value("precio"), error(errors, "precio")));
    body.push_str(&field("Stock", "stock", "text", value("stock"), error(errors, "stock")));
    body.push_str("<button type=\"submit\">Guardar</button>\n</form>");
    page(title, &body)
}

/// Plain message page for errors.
pub fn message(title: &str, text: &str) -> Html<String> {
    page(title, &notice(text, "error"))
}
