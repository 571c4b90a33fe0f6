//! Attribute validation and compilation through the whole pipeline.

use electron_compile::errors;
use electron_conformance::{full_pipeline, full_pipeline_with_config, make_config};
use electron_ir::{find_attr, AttrKey, AttrValue};

fn str_attr(attrs: &[electron_ir::Attr], key: AttrKey) -> Option<&str> {
    match &find_attr(attrs, key)?.value {
        AttrValue::Str(s) => Some(s),
        _ => None,
    }
}

#[test]
fn rotate_compiles_to_one_attribute() {
    let r = full_pipeline("@rotate(90) module m {}");
    assert!(!r.has_errors);
    let rotate: Vec<_> = r
        .module("m")
        .attrs
        .iter()
        .filter(|a| a.key == AttrKey::Rotate)
        .collect();
    assert_eq!(rotate.len(), 1);
    assert_eq!(rotate[0].value, AttrValue::Int(90));
}

#[test]
fn invalid_rotation_fails() {
    let r = full_pipeline("@rotate(45) module m {}");
    assert!(r.netlist.is_none());
    assert_eq!(r.codes(), vec!["E401"]);
    assert_eq!(
        r.diagnostics[0].help,
        vec!["allowed values are 0, 90, 180, 270".to_string()]
    );
}

#[test]
fn rotate_needs_an_integer() {
    let r = full_pipeline("@rotate(\"left\") module m {}");
    assert!(r.has_code(errors::E400));
    assert_eq!(r.messages(), vec!["'@rotate' takes one parameter of type Integer"]);
}

#[test]
fn side_attribute_on_port() {
    let r = full_pipeline("module m { @left input a; @top output b; }");
    assert!(!r.has_errors, "{:?}", r.messages());
    let m = r.module("m");
    assert_eq!(str_attr(&m.ports[0].attrs, AttrKey::Side), Some("left"));
    assert_eq!(str_attr(&m.ports[1].attrs, AttrKey::Side), Some("top"));
}

#[test]
fn supply_nets_are_split() {
    let r = full_pipeline("module m { @power net vcc; @ground net gnd; }");
    assert!(!r.has_errors, "{:?}", r.messages());
    let m = r.module("m");
    assert_eq!(str_attr(&m.nets[0].attrs, AttrKey::Splitnet), Some("$vcc"));
    assert_eq!(str_attr(&m.nets[1].attrs, AttrKey::Splitnet), Some("$gnd"));
}

#[test]
fn cpl_resolves_from_bundled_catalog() {
    let r = full_pipeline("module m { @cpl(\"10k 0603\") cell r; }");
    assert!(!r.has_errors, "{:?}", r.messages());
    let cell = &r.module("m").cells[0];
    assert_eq!(str_attr(&cell.attrs, AttrKey::Man), Some("CPL"));
    assert_eq!(str_attr(&cell.attrs, AttrKey::Mpn), Some("CPL-RES-0603-10K"));
    assert_eq!(str_attr(&cell.attrs, AttrKey::Value), Some("10k"));
    assert_eq!(str_attr(&cell.attrs, AttrKey::Footprint), Some("0603"));
}

#[test]
fn cpl_uses_project_parts() {
    let config = make_config(
        r#"
[catalog]
builtin = false

[catalog.parts.MYCAP]
value = "4u7"
footprint = "0805"
keywords = ["capacitor"]
"#,
    );
    let r = full_pipeline_with_config("module m { @cpl(\"capacitor 0805\") cell c; }", &config);
    assert!(!r.has_errors, "{:?}", r.messages());
    let cell = &r.module("m").cells[0];
    assert_eq!(str_attr(&cell.attrs, AttrKey::Mpn), Some("MYCAP"));
    assert_eq!(str_attr(&cell.attrs, AttrKey::Value), Some("4u7"));

    let r = full_pipeline_with_config("module m { @cpl(\"10k 0603\") cell r; }", &config);
    assert_eq!(r.messages(), vec!["No CPL matches found for '10k 0603'."]);
}

#[test]
fn cpl_without_match() {
    let r = full_pipeline("module m { @cpl(\"flux capacitor\") cell r; }");
    assert!(r.netlist.is_none());
    assert_eq!(r.codes(), vec!["E402"]);
}

#[test]
fn fpga_triple() {
    let r = full_pipeline("@fpga(\"ice40-hx8k-ct256\") module m {}");
    assert!(!r.has_errors);
    assert_eq!(
        str_attr(&r.module("m").attrs, AttrKey::Fpga),
        Some("ice40-hx8k-ct256")
    );

    let r = full_pipeline("@fpga(\"ice40\") module m {}");
    assert_eq!(r.messages(), vec!["Invalid target triple."]);
}

#[test]
fn unknown_attribute() {
    let r = full_pipeline("@sparkle module m {}");
    assert_eq!(r.codes(), vec!["E403"]);
}

#[test]
fn fqn_attributes_apply_to_replicas() {
    let r = full_pipeline("module m { cell[2] c; @rotate(180) c; }");
    assert!(!r.has_errors);
    for cell in &r.module("m").cells {
        assert_eq!(find_attr(&cell.attrs, AttrKey::Rotate).unwrap().value, AttrValue::Int(180));
    }
}
