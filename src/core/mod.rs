/// Calendar whole-year arithmetic
pub mod age;
/// Employee query/update service
pub mod employee;
/// Shortcut value field parsing
pub mod params;
/// Employee value object, mapping and text form
pub mod record;
/// Exact-decimal salary arithmetic
pub mod salary;
/// Canned queries and the shortcut panel
pub mod shortcut;
/// Declarative field constraints
pub mod validation;
