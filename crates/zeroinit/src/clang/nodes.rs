use clang_ast::{BareSourceLocation, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the rewriter cares about.
///
/// Each variant corresponds to a Clang AST node `"kind"` value.
/// The `Other` fallback efficiently skips all unrecognized node kinds.
#[derive(Deserialize)]
pub enum Clang {
    VarDecl(VarDeclData),
    ParmVarDecl(VarDeclData),

    // The `loc` and `range` fields MUST be deserialized even for unrecognized
    // node kinds. The `clang-ast` crate tracks "current file" state across the
    // deserialization stream via `SourceLocation`; if we skip locations for
    // nodes that set the file path, all subsequent nodes inherit an empty
    // file.
    #[allow(dead_code)]
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Data carried by `VarDecl` / `ParmVarDecl` nodes.
///
/// `storage_class` holds Clang's `storageClass` string (`"static"`,
/// `"extern"`, `"register"`, absent for plain automatic/global storage).
/// `init` is Clang's initializer-style marker (`"c"`, `"call"`, `"list"`),
/// present exactly when the declaration carries an explicit initializer.
#[derive(Deserialize, Debug)]
pub struct VarDeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "storageClass")]
    pub storage_class: Option<String>,
    pub init: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
}

/// Clang's qualified type representation.
///
/// `desugared_qual_type` is present when `qual_type` is sugared (typedefs,
/// macros expanding to types) and spells the underlying type.
#[derive(Deserialize, Debug)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
    #[serde(rename = "desugaredQualType")]
    pub desugared_qual_type: Option<String>,
}

impl VarDeclData {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }

    pub fn is_static(&self) -> bool {
        self.storage_class.as_deref() == Some("static")
    }

    pub fn has_external_storage(&self) -> bool {
        self.storage_class.as_deref() == Some("extern")
    }

    pub fn has_init(&self) -> bool {
        self.init.is_some()
    }

    /// The declared type, desugared through typedefs when Clang provides it.
    pub fn declared_type(&self) -> Option<&str> {
        let ty = self.ty.as_ref()?;
        ty.desugared_qual_type.as_deref().or(ty.qual_type.as_deref())
    }

    /// Where an initializer fragment belongs: the byte just past the last
    /// token of this declarator, in the file that token was written in.
    pub fn insertion_point(&self) -> Option<(&str, usize)> {
        let bare = self.range.as_ref().and_then(|r| resolve_loc(&r.end))?;
        Some((&*bare.file, bare.offset + bare.tok_len))
    }

    /// The file containing this declaration's name token, if known.
    pub fn location_file(&self) -> Option<&str> {
        let bare = self.loc.as_ref().and_then(resolve_loc)?;
        Some(&*bare.file)
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location, the position the user sees in their
/// source file when a macro was involved, over the spelling location inside
/// the macro definition.
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
