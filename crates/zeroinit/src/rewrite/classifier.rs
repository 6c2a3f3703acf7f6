use crate::clang::VarDeclData;

/// What to do with one variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitDecision {
    Skip,
    InsertZero,
    InsertEmptyBraces,
}

impl InitDecision {
    /// The fragment to append after the declarator, or `None` for `Skip`.
    pub fn text(self) -> Option<&'static str> {
        match self {
            InitDecision::Skip => None,
            InitDecision::InsertZero => Some(" = 0"),
            InitDecision::InsertEmptyBraces => Some(" = {}"),
        }
    }
}

/// Coarse category of a declared type, derived from Clang's type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Scalar,
    Record,
    Array,
}

/// Decide whether `decl` should receive an initializer, and which form.
///
/// First match wins:
/// 1. `static` storage keeps its implicit zero-initialization.
/// 2. Parameters cannot carry `= value` initializers.
/// 3. `extern` declarations have no definition here to initialize.
/// 4. An existing initializer is never overwritten or duplicated.
/// 5. Otherwise record and array types take `= {}`, everything else `= 0`.
///
/// Reads the declaration only; no other state is consulted.
pub fn classify(decl: &VarDeclData, is_parameter: bool) -> InitDecision {
    if decl.is_static() {
        return InitDecision::Skip;
    }
    if is_parameter {
        return InitDecision::Skip;
    }
    if decl.has_external_storage() {
        return InitDecision::Skip;
    }
    if decl.has_init() {
        return InitDecision::Skip;
    }

    match decl.declared_type().map(type_category) {
        Some(TypeCategory::Record | TypeCategory::Array) => InitDecision::InsertEmptyBraces,
        Some(TypeCategory::Scalar) => InitDecision::InsertZero,
        // A VarDecl without type information is not something we can judge.
        None => InitDecision::Skip,
    }
}

/// Categorize a Clang `qualType` string.
///
/// Works on the desugared spelling when the caller passes one, so typedefs
/// to records classify as records.
pub fn type_category(qual_type: &str) -> TypeCategory {
    let ty = qual_type.trim();
    if is_array_type(ty) {
        TypeCategory::Array
    } else if is_record_type(ty) {
        TypeCategory::Record
    } else {
        TypeCategory::Scalar
    }
}

/// `true` for types whose outermost constructor is an array.
///
/// Clang spells arrays with a trailing bracket chain (`int[3]`,
/// `struct S [2][4]`) and arrays of pointers with the bracket inside the
/// parenthesized declarator (`int (*[3])(void)`). A pointer *to* an array
/// (`int (*)[3]`) also ends in `]` but its bracket chain hangs off a closed
/// declarator paren, which makes the pointer outermost.
fn is_array_type(ty: &str) -> bool {
    let mut s = ty.trim_end();
    let mut stripped_chain = false;
    while let Some(rest) = s.strip_suffix(']') {
        let Some(open) = rest.rfind('[') else {
            return false;
        };
        s = rest[..open].trim_end();
        stripped_chain = true;
    }
    if stripped_chain {
        return !s.ends_with(')');
    }

    has_array_declarator_in_parens(ty)
}

/// Matches the `(*[3])` / `(**[2])` shape Clang prints for arrays of
/// pointers, where the bracket never reaches the end of the type string.
fn has_array_declarator_in_parens(ty: &str) -> bool {
    let bytes = ty.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'(' {
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j] == b'*' {
            j += 1;
        }
        if j > i + 1 && j < bytes.len() && bytes[j] == b'[' {
            return true;
        }
    }
    false
}

/// `true` for plain struct/union types. A `*` anywhere means some level of
/// the declarator is a pointer, which zero-initializes as a scalar.
fn is_record_type(ty: &str) -> bool {
    let mut s = ty.trim();
    loop {
        let before = s;
        for prefix in ["const ", "volatile ", "restrict ", "_Atomic "] {
            if let Some(rest) = before.strip_prefix(prefix) {
                s = rest.trim_start();
                break;
            }
        }
        if before == s {
            break;
        }
    }

    (s.starts_with("struct ") || s.starts_with("union ")) && !s.contains('*')
}

#[cfg(test)]
#[path = "../../tests/src/rewrite/classifier_tests.rs"]
mod tests;
