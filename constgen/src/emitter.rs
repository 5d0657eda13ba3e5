//! C# source rendering for generated classes.
//!
//! Rendering is a pure function of the [`GeneratedClass`]: the same class
//! always produces byte-identical text.

use crate::model::{ConstantValue, GeneratedClass, Member};

/// Header written at the top of every generated file.
pub const HEADER: &str = "// This class is auto-generated do not modify";

/// Mask helpers appended verbatim to the layers class.
const LAYER_HELPERS: &str = "\t\tpublic static int onlyIncluding( params int[] layers )
\t\t{
\t\t\tint mask = 0;
\t\t\tfor( var i = 0; i < layers.Length; i++ )
\t\t\t\tmask |= ( 1 << layers[i] );

\t\t\treturn mask;
\t\t}


\t\tpublic static int everythingBut( params int[] layers )
\t\t{
\t\t\treturn ~onlyIncluding( layers );
\t\t}
";

/// Render a class as a complete C# source file.
pub fn render(class: &GeneratedClass) -> String {
    let mut output = String::new();

    output.push_str(HEADER);
    output.push('\n');
    output.push_str(&format!("namespace {}\n", class.namespace));
    output.push_str("{\n");
    output.push_str(&format!("\tpublic static class {}\n", class.class_name));
    output.push_str("\t{\n");

    for member in &class.members {
        output.push_str("\t\t");
        output.push_str(&render_member(member));
        output.push('\n');
    }

    if class.has_layer_helpers() {
        output.push_str("\n\n");
        output.push_str(LAYER_HELPERS);
    }

    output.push_str("\t}\n");
    output.push_str("}\n");

    output
}

/// Render a single constant declaration.
pub fn render_member(member: &Member) -> String {
    match &member.value {
        ConstantValue::Str(value) => format!(
            "public const string {} = \"{}\";",
            member.identifier,
            escape_literal(value)
        ),
        ConstantValue::Int(value) => format!("public const int {} = {};", member.identifier, value),
    }
}

/// Escape a value for use inside a regular C# string literal.
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassKind;

    fn scenes_class() -> GeneratedClass {
        GeneratedClass::new("Scenes", "k", ClassKind::Scenes).with_members(vec![
            Member::named("Level1").unwrap(),
            Member::named("Main Menu").unwrap(),
        ])
    }

    #[test]
    fn test_render_string_class() {
        let text = render(&scenes_class());
        let expected = "// This class is auto-generated do not modify\n\
                        namespace k\n\
                        {\n\
                        \tpublic static class Scenes\n\
                        \t{\n\
                        \t\tpublic const string LEVEL1 = \"Level1\";\n\
                        \t\tpublic const string MAIN_MENU = \"Main Menu\";\n\
                        \t}\n\
                        }\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_is_idempotent() {
        let class = scenes_class();
        assert_eq!(render(&class), render(&class));
    }

    #[test]
    fn test_render_empty_class() {
        let class = GeneratedClass::new("Tags", "k", ClassKind::Tags);
        assert_eq!(
            render(&class),
            format!("{HEADER}\nnamespace k\n{{\n\tpublic static class Tags\n\t{{\n\t}}\n}}\n")
        );
    }

    #[test]
    fn test_render_layers_appends_helpers() {
        let class = GeneratedClass::new("Layers", "k", ClassKind::Layers).with_members(vec![
            Member::int("Default", 0).unwrap(),
            Member::int("Water", 4).unwrap(),
        ]);
        let text = render(&class);

        assert!(text.contains("\t\tpublic const int DEFAULT = 0;\n\t\tpublic const int WATER = 4;\n\n\n"));
        assert!(text.contains("public static int onlyIncluding( params int[] layers )"));
        assert!(text.contains("return ~onlyIncluding( layers );"));
        assert!(text.ends_with("\t\t}\n\t}\n}\n"));
    }

    #[test]
    fn test_string_class_has_no_helpers() {
        assert!(!render(&scenes_class()).contains("onlyIncluding"));
    }

    #[test]
    fn test_resource_path_value() {
        let member = Member::string("Goblin", "Enemies/Goblin").unwrap();
        assert_eq!(
            render_member(&member),
            "public const string GOBLIN = \"Enemies/Goblin\";"
        );
    }

    #[test]
    fn test_escapes_literal_values() {
        let member = Member::string("Greeting", "Say \"Hi\"").unwrap();
        assert_eq!(
            render_member(&member),
            "public const string GREETING = \"Say \\\"Hi\\\"\";"
        );

        let member = Member::string("Back", "a\\b").unwrap();
        assert_eq!(render_member(&member), "public const string BACK = \"a\\\\b\";");
    }
}
