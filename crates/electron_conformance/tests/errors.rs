//! User errors stop the pipeline; warnings do not.

use electron_compile::errors;
use electron_conformance::full_pipeline;

#[test]
fn undeclared_names() {
    let r = full_pipeline("module m { b = a; }");
    assert!(r.netlist.is_none());
    assert_eq!(r.codes(), vec!["E302", "E302"]);
}

#[test]
fn unknown_module() {
    let r = full_pipeline("module m { cell c; c = nope {}; }");
    assert_eq!(r.codes(), vec!["E301"]);
}

#[test]
fn duplicate_module() {
    let r = full_pipeline("module m {}\nmodule m {}");
    assert_eq!(r.codes(), vec!["E300"]);
    assert_eq!(r.diagnostics[0].labels.len(), 1);
}

#[test]
fn assignment_width_mismatch() {
    let r = full_pipeline("module m { net[2] a; net b; b = a; }");
    assert!(r.netlist.is_none());
    assert!(r.has_code(errors::E314));
}

#[test]
fn reversed_range() {
    let r = full_pipeline("module m { net[5] x; net[3] y; y = x[4:2]; }");
    assert!(r.netlist.is_none());
    assert_eq!(
        r.messages()[0],
        "Start index '4' is larger than end index '2'."
    );
    assert!(r.has_code(errors::E314));
}

#[test]
fn circular_instantiation() {
    let r = full_pipeline("module a { cell c; c = a {}; }");
    assert!(r.netlist.is_none());
    assert!(r.has_code(errors::E315));
}

#[test]
fn syntax_error_stops_before_compilation() {
    let r = full_pipeline("module m {");
    assert!(r.has_errors);
    assert!(r.netlist.is_none());
}

#[test]
fn warnings_do_not_fail() {
    let r = full_pipeline("module m { cell c; }");
    assert!(r.netlist.is_some());
    assert_eq!(r.codes(), vec!["W301"]);
    assert_eq!((r.error_count, r.warning_count), (0, 1));
}

#[test]
fn all_errors_of_a_file_are_reported() {
    let r = full_pipeline("module m { net a; b = a; c = a; }");
    assert_eq!(r.error_count, 2);
}

#[test]
fn negative_range_start() {
    let r = full_pipeline("module m { net[2] x; net[2] y; y = x[0 - 1:1]; }");
    assert!(r.netlist.is_none());
    assert_eq!(r.messages(), vec!["Start index out of bounds."]);
}

#[test]
fn user_mistakes_are_diagnostics_not_defects() {
    let sources = [
        "module m { 1 = 2; }",
        "module m { const k; k = 1; (k, k) = 2; }",
        "module r(v) { net n; n = v; } module top { cell c; c = r {} (1); }",
        "module r(v) { net n; n = v[0:0]; } module top { cell c; c = r {} (1); }",
        "module inv { input a; } module top { cell[2] c; c = inv {}; }",
    ];
    for source in sources {
        let r = full_pipeline(source);
        assert!(r.internal.is_empty(), "{source}: {:?}", r.internal);
        assert!(r.error_count > 0, "{source}");
    }
}
