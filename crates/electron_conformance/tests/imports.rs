//! Designs that import modules from packages.

use electron_conformance::full_pipeline_with_packages;
use electron_ir::AttrKey;

const STD: &str = "module half { input a; output b; }
                   export module buf { input a; output b; cell h; h = half { a, b }; }
                   module hidden { input a; }";

#[test]
fn imported_module_is_instantiated() {
    let r = full_pipeline_with_packages(
        "import buf from \"std\";\nmodule top { input a; output b; cell u; u = buf { a, b }; }",
        &[("std", STD)],
    );
    assert!(!r.has_errors, "{:?}", r.messages());
    assert_eq!(r.names(), vec!["half", "buf", "top"]);

    let buf = r.module("buf");
    assert!(buf.attr(AttrKey::Import).is_some());
    assert!(buf.attr(AttrKey::Export).is_some());
    assert!(r.module("half").attr(AttrKey::Import).is_some());
    assert!(r.module("top").attr(AttrKey::Import).is_none());
    assert_eq!(r.module("top").cells[0].module, r.module_id("buf"));
}

#[test]
fn unexported_module_cannot_be_imported() {
    let r = full_pipeline_with_packages(
        "import hidden from \"std\";\nmodule top {}",
        &[("std", STD)],
    );
    assert!(r.netlist.is_none());
    assert_eq!(r.codes(), vec!["E307"]);
    assert_eq!(r.messages(), vec!["Module 'hidden' is not exported by 'std'."]);
}

#[test]
fn missing_package() {
    let r = full_pipeline_with_packages("import buf from \"nowhere\";\nmodule top {}", &[]);
    assert_eq!(r.messages(), vec!["Package 'nowhere' not found."]);
}

#[test]
fn package_modules_are_not_visible_without_import() {
    let r = full_pipeline_with_packages(
        "module top { cell u; u = buf {}; }",
        &[("std", STD)],
    );
    assert_eq!(r.codes(), vec!["E301"]);
}
