//! SQL scalar functions.
//!
//! - `greeting` - `circe_hello`, `circe_openssl_version`
//! - `cohort` - `circe_json_to_sql`
//! - `dialect` - `circe_sql_render`, `circe_sql_translate`,
//!   `circe_sql_render_translate`
//! - `diagnostics` - `circe_native_library`, `circe_version`
//! - `rows` - column copy-in/copy-out and NULL propagation

pub mod cohort;
pub mod diagnostics;
pub mod dialect;
pub mod greeting;
pub mod rows;

use duckdb::Connection;

pub use cohort::CirceJsonToSql;
pub use diagnostics::{CirceNativeLibrary, CirceVersion};
pub use dialect::{CirceSqlRender, CirceSqlRenderTranslate, CirceSqlTranslate};
pub use greeting::CirceHello;
#[cfg(feature = "openssl")]
pub use greeting::CirceOpenSslVersion;

/// Register every circe function on `con`.
///
/// Nothing native is loaded here; forwarders load the library on first call.
pub fn register(con: &Connection) -> duckdb::Result<()> {
    con.register_scalar_function::<CirceHello>(CirceHello::NAME)?;
    #[cfg(feature = "openssl")]
    con.register_scalar_function::<CirceOpenSslVersion>(CirceOpenSslVersion::NAME)?;
    con.register_scalar_function::<CirceJsonToSql>(CirceJsonToSql::NAME)?;
    con.register_scalar_function::<CirceSqlRender>(CirceSqlRender::NAME)?;
    con.register_scalar_function::<CirceSqlTranslate>(CirceSqlTranslate::NAME)?;
    con.register_scalar_function::<CirceSqlRenderTranslate>(CirceSqlRenderTranslate::NAME)?;
    con.register_scalar_function::<CirceNativeLibrary>(CirceNativeLibrary::NAME)?;
    con.register_scalar_function::<CirceVersion>(CirceVersion::NAME)?;

    log::debug!("FUNCTIONS_REGISTERED count={}", registered_names().len());
    Ok(())
}

/// Names of the functions `register` installs, in registration order.
pub fn registered_names() -> Vec<&'static str> {
    let mut names = vec![CirceHello::NAME];
    #[cfg(feature = "openssl")]
    names.push(CirceOpenSslVersion::NAME);
    names.extend([
        CirceJsonToSql::NAME,
        CirceSqlRender::NAME,
        CirceSqlTranslate::NAME,
        CirceSqlRenderTranslate::NAME,
        CirceNativeLibrary::NAME,
        CirceVersion::NAME,
    ]);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_names() {
        let names = registered_names();
        assert_eq!(names[0], "circe_hello");
        assert!(names.contains(&"circe_json_to_sql"));
        assert!(names.contains(&"circe_sql_render_translate"));
        assert!(names.contains(&"circe_native_library"));
        assert_eq!(names.last(), Some(&"circe_version"));
    }
}
