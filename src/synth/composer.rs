//! Declaration Comment Composer
//!
//! Deterministically composes the English doc comment of a declaration from its
//! structural shape. Output is plain text: lines joined by `\n`, sentences ending in
//! a period, no trailing newline and no comment markers.
//!
//! ## Templates
//!
//! - **Constructors** (`New…`): instance sentence, initialization sentence, error sentence
//! - **Functions/methods**: "is a method" sentence with parameters and results, optional example
//! - **Structs**: mandatory fields, then pointer (optional) fields
//! - **Aliases**: fixed aliasing boilerplate
//! - **Constants/variables**: one sentence per declared name

use crate::constants::composer::CONSTRUCTOR_PREFIX;
use crate::decl::{
    DeclarationShape, Field, FuncDecl, MethodDecl, Param, Receiver, StructDecl, TypeAliasDecl,
    TypeRef, ValueBlock, ValueSpec,
};

use super::describe::describe;
use super::example::synthesize;
use super::grammar::{private_marker, with_article};
use super::names::{NameRole, explain};

/// Composer behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposerOptions {
    /// Append a usage example to function comments
    pub examples: bool,
}

/// One commentable unit, borrowed from a declaration
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Function(&'a FuncDecl),
    Method(&'a MethodDecl),
    Struct(&'a StructDecl),
    TypeAlias(&'a TypeAliasDecl),
    Const {
        name: &'a str,
    },
    Var {
        name: &'a str,
        ty: Option<&'a TypeRef>,
    },
}

impl<'a> Subject<'a> {
    pub fn identifier(&self) -> &'a str {
        match self {
            Self::Function(func) => &func.name,
            Self::Method(method) => &method.func.name,
            Self::Struct(decl) => &decl.name,
            Self::TypeAlias(alias) => &alias.name,
            Self::Const { name } | Self::Var { name, .. } => name,
        }
    }

    /// Function signature and receiver, for functions and methods
    pub fn callable(&self) -> Option<(&'a FuncDecl, Option<&'a Receiver>)> {
        match self {
            Self::Function(func) => Some((func, None)),
            Self::Method(method) => Some((&method.func, Some(&method.receiver))),
            _ => None,
        }
    }

    /// Every commentable unit of a declaration shape, in source order
    pub fn of_shape(shape: &'a DeclarationShape) -> Vec<Subject<'a>> {
        match shape {
            DeclarationShape::Function(func) => vec![Subject::Function(func)],
            DeclarationShape::Method(method) => vec![Subject::Method(method)],
            DeclarationShape::Struct(decl) => vec![Subject::Struct(decl)],
            DeclarationShape::TypeAlias(alias) => vec![Subject::TypeAlias(alias)],
            DeclarationShape::Const(_) | DeclarationShape::Var(_) => Subject::values(shape),
        }
    }

    /// Subjects of every name declared in a const or var block, in order
    pub fn values(shape: &'a DeclarationShape) -> Vec<Subject<'a>> {
        match shape {
            DeclarationShape::Const(block) => value_subjects(block, false),
            DeclarationShape::Var(block) => value_subjects(block, true),
            _ => Vec::new(),
        }
    }

    /// Subjects of the names declared by one const or var spec
    pub fn spec_values(spec: &'a ValueSpec, is_var: bool) -> Vec<Subject<'a>> {
        spec.names
            .iter()
            .map(|name| {
                if is_var {
                    Subject::Var {
                        name,
                        ty: spec.ty.as_ref(),
                    }
                } else {
                    Subject::Const { name }
                }
            })
            .collect()
    }
}

fn value_subjects(block: &ValueBlock, is_var: bool) -> Vec<Subject<'_>> {
    block
        .specs
        .iter()
        .flat_map(|spec| Subject::spec_values(spec, is_var))
        .collect()
}

/// Heuristic comment composer
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: ComposerOptions,
}

impl Composer {
    pub fn new(options: ComposerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ComposerOptions {
        self.options
    }

    /// Compose the comment for a whole declaration shape.
    ///
    /// Const and var blocks yield one sentence per declared name, one per line.
    pub fn compose(&self, shape: &DeclarationShape) -> String {
        Subject::of_shape(shape)
            .into_iter()
            .map(|subject| self.compose_subject(subject))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn compose_subject(&self, subject: Subject<'_>) -> String {
        match subject {
            Subject::Function(func) => self.compose_func(func, None),
            Subject::Method(method) => self.compose_func(&method.func, Some(&method.receiver)),
            Subject::Struct(decl) => compose_struct(decl),
            Subject::TypeAlias(alias) => compose_alias(alias),
            Subject::Const { name } => compose_const(name),
            Subject::Var { name, ty } => compose_var(name, ty),
        }
    }

    fn compose_func(&self, func: &FuncDecl, receiver: Option<&Receiver>) -> String {
        if func.name.starts_with(CONSTRUCTOR_PREFIX) {
            return compose_constructor(func);
        }

        let mut text = format!(
            "{} is a {}method{}",
            func.name,
            private_marker(&func.name),
            clause(&func.name, NameRole::Function)
        );
        if let Some(receiver) = receiver {
            text.push_str(&format!(
                " that belongs to the {} struct",
                receiver.type_name
            ));
        }

        if func.params.is_empty() && func.results.is_empty() {
            text.push_str(".\nIt does not take any arguments.");
            return text;
        }

        if !func.params.is_empty() {
            let params = func
                .params
                .iter()
                .map(param_phrase)
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(" that take ");
            text.push_str(&params);
        }

        let returns = func
            .results
            .iter()
            .filter(|r| !r.is_error())
            .map(|r| with_article(&describe(&r.ty)))
            .collect::<Vec<_>>();
        if !returns.is_empty() {
            text.push_str("\nand returns ");
            text.push_str(&returns.join(" and "));
        }
        text.push('.');

        if func.has_error_result() {
            text.push_str("\nIt's return an error if fails, otherwise nil.");
        }

        if self.options.examples {
            let example = synthesize(&func.name, &func.params, &func.results);
            if !example.is_empty() {
                text.push_str("\n\n");
                text.push_str(&example);
            }
        }

        text
    }
}

/// Explanation clause with its leading space, or nothing
fn clause(identifier: &str, role: NameRole) -> String {
    let explained = explain(identifier, role);
    if explained.is_empty() {
        explained
    } else {
        format!(" {}", explained)
    }
}

fn param_phrase(param: &Param) -> String {
    let ty = describe(&param.ty);
    match &param.name {
        Some(name) => format!("{} of type {}", with_article(name), ty),
        None => with_article(&ty),
    }
}

fn compose_constructor(func: &FuncDecl) -> String {
    let instances: Vec<String> = func
        .results
        .iter()
        .filter(|r| !r.is_error())
        .map(|r| describe(&r.ty))
        .collect();

    let mut lines = Vec::new();
    if instances.is_empty() {
        lines.push(format!("{} creates a new instance.", func.name));
    } else {
        lines.push(format!(
            "{} creates a new instance of {}.",
            func.name,
            instances.join(" and ")
        ));
    }

    if !func.params.is_empty() {
        let primary = instances.first().map(String::as_str).unwrap_or("instance");
        let provided = func
            .params
            .iter()
            .map(|p| {
                let ty = describe(&p.ty);
                match &p.name {
                    Some(name) => format!("{} of type {}", name, ty),
                    None => ty,
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "It initializes the {} with the provided {}.",
            primary, provided
        ));
    }

    if func.has_error_result() {
        lines.push("It's return an error if the initialization fails, otherwise nil.".to_string());
    }

    lines.join("\n")
}

fn compose_struct(decl: &StructDecl) -> String {
    let header = format!(
        "{} represents a {}structure",
        decl.name,
        private_marker(&decl.name)
    );
    if decl.fields.is_empty() {
        return format!("{}.", header);
    }

    let (mandatory, optional) = decl.partition_fields();
    let mut lines = vec![format!("{} for", header)];

    if optional.is_empty() {
        lines.push(format!(
            "It contains information about {}.",
            field_list(&mandatory)
        ));
    } else if mandatory.is_empty() {
        lines.push(format!(
            "It contains optional information about {}.",
            field_list(&optional)
        ));
    } else {
        lines.push(format!(
            "It contains information about {} and",
            field_list(&mandatory)
        ));
        lines.push(format!("optionally {}.", field_list(&optional)));
    }

    lines.join("\n")
}

fn field_list(fields: &[&Field]) -> String {
    fields
        .iter()
        .map(|f| with_article(&format!("{}{}", private_marker(&f.name), f.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn compose_alias(alias: &TypeAliasDecl) -> String {
    let underlying = describe(&alias.underlying);
    format!(
        "{name} is a type alias for the {underlying} type.\n\
         It allows you to create a new type with the same\n\
         underlying type as {underlying}, but with a different name.\n\
         This can be useful for improving code readability\n\
         and providing more semantic meaning to your types.",
        name = alias.name,
        underlying = underlying
    )
}

fn compose_const(name: &str) -> String {
    format!(
        "{} is a {}constant{}.",
        name,
        private_marker(name),
        clause(name, NameRole::Value)
    )
}

fn compose_var(name: &str, ty: Option<&TypeRef>) -> String {
    let of_type = ty
        .map(|t| format!(" of type {}", describe(t)))
        .unwrap_or_default();
    format!(
        "{} is a {}variable{}{}.",
        name,
        private_marker(name),
        of_type,
        clause(name, NameRole::Value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn composer() -> Composer {
        Composer::default()
    }

    #[test]
    fn test_constructor_routing() {
        let func = FuncDecl::new("NewWidget")
            .param("cfg", "Config")
            .result("*Widget")
            .result("error");
        let text = composer().compose(&DeclarationShape::Function(func));
        assert_eq!(
            text,
            "NewWidget creates a new instance of *Widget.\n\
             It initializes the *Widget with the provided cfg of type Config.\n\
             It's return an error if the initialization fails, otherwise nil."
        );
        assert!(!text.contains("is a method"));
    }

    #[test]
    fn test_constructor_without_params() {
        let func = FuncDecl::new("NewPool").result("*Pool").result("Stats");
        assert_eq!(
            composer().compose(&DeclarationShape::Function(func)),
            "NewPool creates a new instance of *Pool and Stats."
        );
    }

    #[test]
    fn test_trivial_function() {
        let func = FuncDecl::new("Run");
        assert_eq!(
            composer().compose(&DeclarationShape::Function(func)),
            "Run is a method.\nIt does not take any arguments."
        );

        let method = MethodDecl {
            receiver: Receiver::pointer("Server"),
            func: FuncDecl::new("shutdownNow"),
        };
        assert_eq!(
            composer().compose(&DeclarationShape::Method(method)),
            "shutdownNow is a private method which execute shutdown now \
             that belongs to the Server struct.\nIt does not take any arguments."
        );
    }

    #[test]
    fn test_function_with_params_and_results() {
        let func = FuncDecl::new("GetUserByID")
            .param("id", "int")
            .param("opts", "[]Option")
            .result("*User")
            .result("error");
        assert_eq!(
            composer().compose(&DeclarationShape::Function(func)),
            "GetUserByID is a method that retrieve the user by id that take \
             an id of type int, an opts of type []Option\n\
             and returns a *User.\n\
             It's return an error if fails, otherwise nil."
        );
    }

    #[test]
    fn test_error_first_result_is_suppressed() {
        let func = FuncDecl::new("Load").result("error").result("int").result("string");
        let text = composer().compose(&DeclarationShape::Function(func));
        assert!(text.contains("\nand returns an int and a string."));
        assert!(!text.contains("an error and"));
    }

    #[test]
    fn test_unnamed_params() {
        let mut func = FuncDecl::new("Apply");
        func.params.push(Param::unnamed("int"));
        let text = composer().compose(&DeclarationShape::Function(func));
        assert_eq!(text, "Apply is a method that take an int.");
    }

    #[test]
    fn test_example_appended_when_enabled() {
        let func = FuncDecl::new("IsReady").param("name", "string").result("bool");
        let shape = DeclarationShape::Function(func);

        let plain = composer().compose(&shape);
        assert!(!plain.contains("Example:"));

        let with_examples = Composer::new(ComposerOptions { examples: true }).compose(&shape);
        assert!(with_examples.starts_with(&plain));
        assert!(with_examples.contains("\n\nExample:\n  valid := IsReady(\"my-string\")"));
    }

    #[test]
    fn test_example_suppressed_for_unknown_param_type() {
        let func = FuncDecl::new("Render").param("tpl", "Template").result("string");
        let text = Composer::new(ComposerOptions { examples: true })
            .compose(&DeclarationShape::Function(func));
        assert_eq!(
            text,
            "Render is a method that take a tpl of type Template\nand returns a string."
        );
    }

    #[test]
    fn test_struct_field_partition() {
        let decl = StructDecl::new("Settings")
            .field("Key", "string")
            .field("KeyB", "int")
            .field("KeyD", "*int");
        assert_eq!(
            composer().compose(&DeclarationShape::Struct(decl)),
            "Settings represents a structure for\n\
             It contains information about a Key, a KeyB and\n\
             optionally a KeyD."
        );
    }

    #[test]
    fn test_struct_only_optional_private_fields() {
        let decl = StructDecl::new("cache")
            .field("entries", "*map[string]int")
            .field("Owner", "*User");
        assert_eq!(
            composer().compose(&DeclarationShape::Struct(decl)),
            "cache represents a private structure for\n\
             It contains optional information about a private entries, an Owner."
        );
    }

    #[test]
    fn test_empty_struct() {
        assert_eq!(
            composer().compose(&DeclarationShape::Struct(StructDecl::new("Marker"))),
            "Marker represents a structure."
        );
    }

    #[test]
    fn test_alias() {
        let alias = TypeAliasDecl {
            name: "Celsius".to_string(),
            underlying: TypeRef::named("float64"),
        };
        let text = composer().compose(&DeclarationShape::TypeAlias(alias));
        assert!(text.starts_with("Celsius is a type alias for the float64 type.\n"));
        assert!(text.contains("underlying type as float64, but with a different name."));
    }

    #[test]
    fn test_const_and_var() {
        let consts = DeclarationShape::Const(ValueBlock::grouped(vec![
            ValueSpec::new("MaxRetries"),
            ValueSpec::new("x"),
        ]));
        assert_eq!(
            composer().compose(&consts),
            "MaxRetries is a constant which execute max retries.\nx is a private constant."
        );

        let vars = DeclarationShape::Var(ValueBlock::single(ValueSpec::typed(
            "defaultBaseURL",
            "string",
        )));
        assert_eq!(
            composer().compose(&vars),
            "defaultBaseURL is a private variable of type string \
             that indicates the endpoint URL for accessing to default base."
        );
    }

    #[test]
    fn test_untyped_var() {
        let vars = DeclarationShape::Var(ValueBlock::single(ValueSpec::new("Version")));
        assert_eq!(composer().compose(&vars), "Version is a variable.");
    }

    proptest! {
        #[test]
        fn test_compose_is_deterministic(
            name in "[A-Za-z][A-Za-z0-9]{0,12}",
            params in proptest::collection::vec(
                ("[a-z]{1,6}", "(int|string|bool|\\*T|\\[\\]byte|Ctx)"),
                0..4,
            ),
            results in proptest::collection::vec("(int|error|string|\\*T)", 0..3),
        ) {
            let mut func = FuncDecl::new(name);
            for (n, t) in &params {
                func = func.param(n.as_str(), t.as_str());
            }
            for r in &results {
                func = func.result(r.as_str());
            }
            let shape = DeclarationShape::Function(func);
            let composer = Composer::new(ComposerOptions { examples: true });
            let first = composer.compose(&shape);
            prop_assert_eq!(&first, &composer.compose(&shape));
            prop_assert!(!first.is_empty());
            prop_assert!(!first.ends_with('\n'));
        }
    }
}
