//! Approximate endpoint and schema counts.
//!
//! Counts are regex heuristics reported to the user, nothing more. Comments,
//! unrelated `.get(` calls and the like all inflate them, and a registration
//! matching two idioms is counted twice.

use crate::context::FileEntry;
use crate::patterns::{ENDPOINT_PATTERNS, SCHEMA_DECLARATION_PATTERN};
use once_cell::sync::Lazy;
use regex::Regex;

static ENDPOINT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&ENDPOINT_PATTERNS.join("|")).expect("endpoint patterns should be valid")
});

static SCHEMA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(SCHEMA_DECLARATION_PATTERN).expect("schema declaration pattern should be valid")
});

/// Counts non-overlapping endpoint registrations across the route files.
pub fn count_endpoints(route_files: &[FileEntry]) -> usize {
    route_files
        .iter()
        .map(|file| ENDPOINT_REGEX.find_iter(&file.content).count())
        .sum()
}

/// Counts type/class/struct/record declarations across the schema files.
pub fn count_schemas(schema_files: &[FileEntry]) -> usize {
    schema_files
        .iter()
        .map(|file| SCHEMA_REGEX.find_iter(&file.content).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(path: &str, content: &str) -> Vec<FileEntry> {
        vec![FileEntry::new(path, content)]
    }

    #[test]
    fn test_count_endpoints_spring() {
        let route_files = files(
            "UserController.java",
            "@GetMapping(\"/users\")\n@PostMapping(\"/users\")\n@DeleteMapping(\"/users/{id}\")",
        );
        assert_eq!(count_endpoints(&route_files), 3);
    }

    #[test]
    fn test_count_endpoints_express() {
        let route_files = files(
            "routes.ts",
            "router.get(\"/users\", handler);\nrouter.post(\"/users\", handler);",
        );
        assert_eq!(count_endpoints(&route_files), 2);
    }

    #[test]
    fn test_count_endpoints_fastapi() {
        let route_files = files(
            "routers/items.py",
            "@router.get(\"/items\")\ndef list_items(): ...\n\n@router.post(\"/items\")\ndef create_item(): ...",
        );
        // the decorator idiom and the method-call idiom overlap; leftmost match wins
        assert_eq!(count_endpoints(&route_files), 2);
    }

    #[test]
    fn test_count_endpoints_go() {
        let route_files = files(
            "routes.go",
            "r.GET(\"/ping\", ping)\nr.POST(\"/users\", create)\nhttp.HandleFunc(\"/health\", health)",
        );
        assert_eq!(count_endpoints(&route_files), 3);
    }

    #[test]
    fn test_count_endpoints_sums_across_files() {
        let route_files = vec![
            FileEntry::new("a.ts", "app.get('/a', h)"),
            FileEntry::new("b.ts", "app.delete('/b', h)\napp.put('/b', h)"),
            FileEntry::new("c.ts", "// nothing here"),
        ];
        assert_eq!(count_endpoints(&route_files), 3);
    }

    #[test]
    fn test_count_endpoints_empty() {
        assert_eq!(count_endpoints(&[]), 0);
    }

    #[test]
    fn test_count_schemas_typescript() {
        let schema_files = files(
            "user.dto.ts",
            "export class CreateUserDto {\n  name: string;\n}\nexport interface User {\n  id: number;\n}",
        );
        assert_eq!(count_schemas(&schema_files), 2);
    }

    #[test]
    fn test_count_schemas_python() {
        let schema_files = files(
            "models.py",
            "class User(BaseModel):\n    name: str\n\n@dataclass\nclass Config:\n    debug: bool",
        );
        assert_eq!(count_schemas(&schema_files), 2);
    }

    #[test]
    fn test_count_schemas_go_and_kotlin() {
        let schema_files = vec![
            FileEntry::new("types.go", "package types\n\ntype User struct {\n\tID int\n}"),
            FileEntry::new("User.kt", "data class User(val id: Long)\nrecord Point(int x, int y) {}"),
        ];
        assert_eq!(count_schemas(&schema_files), 3);
    }
}
