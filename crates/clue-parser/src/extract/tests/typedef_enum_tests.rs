use super::*;

// ── Typedef tests ─────────────────────────────────────────────────

#[test]
fn typedef_of_anonymous_struct() {
    let table = extract("typedef struct { int x; int y; } Point;\nPoint p;\n");
    let ty = variable_ctype(&table, "p");
    assert_eq!(ty.label(), "struct (anonymous)");
    let names: Vec<_> = table
        .members_of(&ty)
        .expect("members")
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn typedef_of_tagged_struct_and_pointer() {
    let table = extract("typedef struct P { int x; } P_t, *P_ptr;\nP_ptr handle;\n");
    assert_eq!(variable_type(&table, "handle"), "struct P");
    assert!(matches!(
        find(&table, "P_t"),
        Declaration::Typedef { target, .. } if target.label() == "struct P"
    ));
}

#[test]
fn typedef_of_primitive() {
    let table = extract("typedef unsigned int uint;\nuint n;\n");
    assert_eq!(variable_type(&table, "n"), "unsigned int");
}

#[test]
fn function_pointer_typedef() {
    let table = extract("typedef void (*handler)(int);\nhandler on_exit;\n");
    assert_eq!(variable_type(&table, "on_exit"), "void (*)(int)");
}

// ── Enum tests ────────────────────────────────────────────────────

#[test]
fn enum_and_enumerators_register() {
    let table = extract("enum Color { RED, GREEN = 2, BLUE };\nenum Color c;\n");
    assert_eq!(
        find(&table, "Color"),
        &Declaration::Enum {
            name: "Color".to_string()
        }
    );
    for name in ["RED", "GREEN", "BLUE", "c"] {
        assert_eq!(variable_type(&table, name), "enum Color", "{name}");
    }
}

#[test]
fn anonymous_enum_constants_are_int() {
    let table = extract("enum { ALPHA, BETA };\n");
    assert_eq!(variable_type(&table, "ALPHA"), "int");
}
