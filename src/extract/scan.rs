//! Line-by-line declaration scanning.

use crate::languages::LanguagePatternSet;

use super::Entity;

/// Extract declarations from a file's content.
///
/// Patterns run in table order, each over every line, so the result is
/// grouped by pattern and then ordered by line. A line hit by two patterns
/// yields two entities; duplicates are kept. Never fails.
pub fn extract_entities(content: &str, language: &LanguagePatternSet) -> Vec<Entity> {
    let lines: Vec<&str> = content.lines().collect();
    extract_from_lines(&lines, language)
}

/// Same as [`extract_entities`] over content already split with `str::lines`.
pub(crate) fn extract_from_lines(lines: &[&str], language: &LanguagePatternSet) -> Vec<Entity> {
    let mut entities = Vec::new();

    for (kind, regex) in language.patterns() {
        for (idx, line) in lines.iter().enumerate() {
            for caps in regex.captures_iter(line) {
                // First non-empty group is the declared name
                let name = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .find(|s| !s.is_empty());

                if let Some(name) = name {
                    entities.push(Entity {
                        kind: *kind,
                        name: name.to_string(),
                        line: idx + 1,
                        language: language.id().to_string(),
                    });
                }
            }
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::EntityKind;
    use crate::languages::{LanguageDef, LanguageTable, PatternDef};

    fn lang(id: &str) -> &'static LanguagePatternSet {
        LanguageTable::builtin().get(id).unwrap()
    }

    fn names(entities: &[Entity]) -> Vec<(EntityKind, &str, usize)> {
        entities
            .iter()
            .map(|e| (e.kind, e.name.as_str(), e.line))
            .collect()
    }

    #[test]
    fn test_python_defs_and_classes() {
        let src = "def foo():\n    bar()\n\ndef bar():\n    pass\n";
        let entities = extract_entities(src, lang("python"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Def, "foo", 1), (EntityKind::Def, "bar", 4)]
        );

        let src = "class Repo(Base):\n    async def fetch(self):\n        pass\n";
        let entities = extract_entities(src, lang("python"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Def, "fetch", 2), (EntityKind::Class, "Repo", 1)]
        );
        assert!(entities.iter().all(|e| e.language == "python"));
    }

    #[test]
    fn test_javascript_functions_and_classes() {
        let src = "class User {}\nfunction greet(u) { return u; }\n";
        let entities = extract_entities(src, lang("javascript"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Function, "greet", 2), (EntityKind::Class, "User", 1)]
        );

        let src = "export const load = async (id) => fetch(id);\nlet noop = x => x;\nconst n = 5;\n";
        let entities = extract_entities(src, lang("javascript"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Function, "load", 1), (EntityKind::Function, "noop", 2)]
        );
    }

    #[test]
    fn test_typescript_types() {
        let src = "export interface Props {}\ntype Id = string;\nexport enum Color { Red }\nexport default class App {}\n";
        let entities = extract_entities(src, lang("typescript"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Class, "App", 4),
                (EntityKind::Interface, "Props", 1),
                (EntityKind::Type, "Id", 2),
                (EntityKind::Enum, "Color", 3),
            ]
        );
    }

    #[test]
    fn test_go_kinds_not_normalized() {
        let src = "package main\n\ntype Server struct {}\n\nfunc (s *Server) Start() error {\n\treturn nil\n}\n\nfunc main() {}\n";
        let entities = extract_entities(src, lang("go"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Func, "Start", 5),
                (EntityKind::Func, "main", 9),
                (EntityKind::Type, "Server", 3),
            ]
        );
    }

    #[test]
    fn test_rust_items() {
        let src = "pub struct Config;\npub(crate) trait Load {}\nasync fn run() {}\n    pub fn new() -> Self { Self }\nmod tests {}\n";
        let entities = extract_entities(src, lang("rust"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Function, "run", 3),
                (EntityKind::Function, "new", 4),
                (EntityKind::Struct, "Config", 1),
                (EntityKind::Trait, "Load", 2),
                (EntityKind::Module, "tests", 5),
            ]
        );
    }

    #[test]
    fn test_java_methods() {
        let src = "public class App {\n    public static void main(String[] args) {\n        run();\n    }\n    private List<String> names() { return null; }\n}\n";
        let entities = extract_entities(src, lang("java"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Method, "main", 2),
                (EntityKind::Method, "names", 5),
                (EntityKind::Class, "App", 1),
            ]
        );
    }

    #[test]
    fn test_swift_class_func_not_a_class() {
        let src = "final class Cache {\n    class func shared() -> Cache { Cache() }\n}\n";
        let entities = extract_entities(src, lang("swift"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Func, "shared", 2), (EntityKind::Class, "Cache", 1)]
        );
    }

    #[test]
    fn test_c_skips_control_flow_and_prototypes() {
        let src = "struct point {\n    int x;\n};\ntypedef enum color { RED } color_t;\nstatic int add(int a, int b) {\n    return helper(a);\n}\nelse if (b) {\nint *make_buf(size_t n)\nint decl_only(int a);\nreturn helper(a)\n";
        let entities = extract_entities(src, lang("c"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Function, "add", 5),
                (EntityKind::Function, "make_buf", 9),
                (EntityKind::Struct, "point", 1),
                (EntityKind::Enum, "color", 4),
            ]
        );
    }

    #[test]
    fn test_cpp_items() {
        let src = "namespace geo {\ntemplate <typename T> class Box {\nstruct Point {\nenum class Shape { Circle };\nint Box::area() const {\nreturn bar(x)\nelse if (ok) {\nvoid decl(int a);\n";
        let entities = extract_entities(src, lang("cpp"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Function, "area", 5),
                (EntityKind::Class, "Box", 2),
                (EntityKind::Struct, "Point", 3),
                (EntityKind::Enum, "Shape", 4),
                (EntityKind::Module, "geo", 1),
            ]
        );
    }

    #[test]
    fn test_csharp_fields_and_generic_headers_are_not_methods() {
        let src = "public class Repo<T> {\n    private readonly List<int> items = new List<int>();\n    public static readonly Dictionary<string, int> Map = new();\n    public int Count() { return items.Count; }\n    public async Task<T> LoadAsync<TKey>(TKey key) { }\n}\npublic interface IStore {}\npublic readonly struct Point {}\ninternal enum Kind { A }\npublic record Person(string Name);\npublic class Widget(int size) {}\n";
        let entities = extract_entities(src, lang("csharp"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Method, "Count", 4),
                (EntityKind::Method, "LoadAsync", 5),
                (EntityKind::Class, "Repo", 1),
                (EntityKind::Class, "Widget", 11),
                (EntityKind::Interface, "IStore", 7),
                (EntityKind::Struct, "Point", 8),
                (EntityKind::Enum, "Kind", 9),
            ]
        );
    }

    #[test]
    fn test_ruby_items() {
        let src = "module Billing\n  class Invoice\n    def self.build(attrs)\n    def total\n    end\n  end\nend\ndefined?(x)\n";
        let entities = extract_entities(src, lang("ruby"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Def, "build", 3),
                (EntityKind::Def, "total", 4),
                (EntityKind::Class, "Invoice", 2),
                (EntityKind::Module, "Billing", 1),
            ]
        );
    }

    #[test]
    fn test_php_items() {
        let src = "<?php\ninterface Payable {}\ntrait Loggable {}\nfinal class Invoice implements Payable {\n    public static function create(): self {}\n    private function &items() {}\n}\n$fn = function ($x) { return $x; };\n";
        let entities = extract_entities(src, lang("php"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Function, "create", 5),
                (EntityKind::Function, "items", 6),
                (EntityKind::Class, "Invoice", 4),
                (EntityKind::Interface, "Payable", 2),
                (EntityKind::Trait, "Loggable", 3),
            ]
        );
    }

    #[test]
    fn test_kotlin_items() {
        let src = "data class User(val id: Int)\nsealed interface Shape\nobject Registry {\n    suspend fun load(id: Int): User = TODO()\n    fun String.shout(): String = uppercase()\n}\nval funny = 1\n";
        let entities = extract_entities(src, lang("kotlin"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Function, "load", 4),
                (EntityKind::Function, "shout", 5),
                (EntityKind::Class, "User", 1),
                (EntityKind::Interface, "Shape", 2),
                (EntityKind::Module, "Registry", 3),
            ]
        );
    }

    #[test]
    fn test_scala_items() {
        let src = "sealed trait Animal\ncase class Dog(name: String) extends Animal\nobject Kennel {\n  private def adopt(d: Dog): Unit = ()\n  override def toString = \"kennel\"\n}\nval default = 1\n";
        let entities = extract_entities(src, lang("scala"));
        assert_eq!(
            names(&entities),
            vec![
                (EntityKind::Def, "adopt", 4),
                (EntityKind::Def, "toString", 5),
                (EntityKind::Class, "Dog", 2),
                (EntityKind::Trait, "Animal", 1),
                (EntityKind::Module, "Kennel", 3),
            ]
        );
    }

    #[test]
    fn test_overlapping_patterns_keep_duplicates() {
        let def = LanguageDef {
            id: "toy".to_string(),
            extensions: vec!["toy".to_string()],
            patterns: vec![
                PatternDef {
                    kind: EntityKind::Function,
                    pattern: r"fn\s+(\w+)".to_string(),
                },
                PatternDef {
                    kind: EntityKind::Function,
                    pattern: r"(?:pub\s+)?fn\s+(\w+)".to_string(),
                },
            ],
        };
        let set = LanguagePatternSet::compile(&def).unwrap();
        let entities = extract_entities("pub fn go() {}", &set);
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.name == "go" && e.line == 1));
    }

    #[test]
    fn test_first_non_empty_group_is_name() {
        let def = LanguageDef {
            id: "toy".to_string(),
            extensions: vec!["toy".to_string()],
            patterns: vec![PatternDef {
                kind: EntityKind::Function,
                pattern: r"(?:fn\s+(\w+)|let\s+(\w+)\s*=\s*\|)".to_string(),
            }],
        };
        let set = LanguagePatternSet::compile(&def).unwrap();
        let entities = extract_entities("fn a()\nlet b = |x| x\n", &set);
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Function, "a", 1), (EntityKind::Function, "b", 2)]
        );
    }

    #[test]
    fn test_malformed_input_never_fails() {
        let inputs = [
            "",
            "\n\n\n",
            "def (",
            "class\n",
            "def \u{1F600}():",
            "\0\0\0",
            "function function function(",
        ];
        for input in inputs {
            for lang in LanguageTable::builtin().languages() {
                let entities = extract_entities(input, lang);
                assert!(entities.iter().all(|e| !e.name.is_empty()));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let src = "def a():\n    b()\nclass C:\n    def b(self):\n        a()\n";
        let first = extract_entities(src, lang("python"));
        let second = extract_entities(src, lang("python"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_crlf_lines() {
        let src = "def a():\r\n    pass\r\ndef b():\r\n";
        let entities = extract_entities(src, lang("python"));
        assert_eq!(
            names(&entities),
            vec![(EntityKind::Def, "a", 1), (EntityKind::Def, "b", 3)]
        );
    }
}
