use super::*;

use crate::clang::{QualType, VarDeclData};

fn var(ty: &str) -> VarDeclData {
    VarDeclData {
        name: Some("v".to_string()),
        loc: None,
        range: None,
        is_implicit: None,
        storage_class: None,
        init: None,
        ty: Some(QualType {
            qual_type: Some(ty.to_string()),
            desugared_qual_type: None,
        }),
    }
}

#[test]
fn static_storage_is_skipped() {
    let mut d = var("int");
    d.storage_class = Some("static".to_string());
    assert_eq!(classify(&d, false), InitDecision::Skip);
}

#[test]
fn parameters_are_skipped() {
    assert_eq!(classify(&var("int"), true), InitDecision::Skip);
}

#[test]
fn external_storage_is_skipped() {
    let mut d = var("int");
    d.storage_class = Some("extern".to_string());
    assert_eq!(classify(&d, false), InitDecision::Skip);
}

#[test]
fn existing_initializer_is_never_touched() {
    let mut d = var("int");
    d.init = Some("c".to_string());
    assert_eq!(classify(&d, false), InitDecision::Skip);
}

#[test]
fn static_wins_over_later_checks() {
    // First match wins: a static with an initializer is still "static".
    let mut d = var("struct S");
    d.storage_class = Some("static".to_string());
    d.init = Some("list".to_string());
    assert_eq!(classify(&d, false), InitDecision::Skip);
}

#[test]
fn scalars_get_zero() {
    for ty in ["int", "unsigned long", "float", "double", "char", "_Bool", "enum E"] {
        assert_eq!(classify(&var(ty), false), InitDecision::InsertZero, "{ty}");
    }
}

#[test]
fn pointers_get_zero() {
    for ty in ["int *", "char **", "struct S *", "const char *", "void (*)(int)", "int (*)[3]"] {
        assert_eq!(classify(&var(ty), false), InitDecision::InsertZero, "{ty}");
    }
}

#[test]
fn records_get_empty_braces() {
    for ty in [
        "struct S",
        "const struct S",
        "union U",
        "volatile union U",
        "struct (unnamed struct at /tmp/t.c:1:13)",
    ] {
        assert_eq!(classify(&var(ty), false), InitDecision::InsertEmptyBraces, "{ty}");
    }
}

#[test]
fn arrays_get_empty_braces() {
    for ty in ["int[3]", "int [2][4]", "char *[3]", "struct S[8]", "int (*[3])(void)", "int[]"] {
        assert_eq!(classify(&var(ty), false), InitDecision::InsertEmptyBraces, "{ty}");
    }
}

#[test]
fn typedefs_classify_through_the_desugared_type() {
    let mut d = var("myvec_t");
    d.ty = Some(QualType {
        qual_type: Some("myvec_t".to_string()),
        desugared_qual_type: Some("struct myvec".to_string()),
    });
    assert_eq!(classify(&d, false), InitDecision::InsertEmptyBraces);
}

#[test]
fn missing_type_information_is_skipped() {
    let mut d = var("int");
    d.ty = None;
    assert_eq!(classify(&d, false), InitDecision::Skip);
}

#[test]
fn decision_text_fragments() {
    assert_eq!(InitDecision::Skip.text(), None);
    assert_eq!(InitDecision::InsertZero.text(), Some(" = 0"));
    assert_eq!(InitDecision::InsertEmptyBraces.text(), Some(" = {}"));
}

#[test]
fn type_category_distinguishes_pointer_to_array_from_array() {
    assert_eq!(type_category("int (*)[3]"), TypeCategory::Scalar);
    assert_eq!(type_category("int[3]"), TypeCategory::Array);
    assert_eq!(type_category("int (*[3])(void)"), TypeCategory::Array);
    assert_eq!(type_category("void (*)(int)"), TypeCategory::Scalar);
    assert_eq!(type_category("struct S"), TypeCategory::Record);
    assert_eq!(type_category("struct S *"), TypeCategory::Scalar);
}
