//! Static lookup tables driving framework detection and file selection.
//!
//! Frameworks differ only in which manifest markers identify them and which
//! glob patterns locate their routes and schemas, so everything here is plain
//! ordered data. Order matters: detection is first-match-wins and file
//! selection keeps pattern order.

use crate::config::Limits;

/// Identifier returned when no manifest marker matches.
pub const UNKNOWN_FRAMEWORK: &str = "unknown";

/// Directory names that are never scanned, listed or selected.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "venv",
    ".venv",
    "dist",
    "build",
    "target",
    ".gradle",
    ".idea",
    ".git",
    ".specs",
    ".openapi",
];

/// Manifests whose excerpts are included in the prompt, in prompt order.
pub const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
];

/// Manifest file -> (lowercase marker substring, framework identifier).
pub const FRAMEWORK_MARKERS: &[(&str, &[(&str, &str)])] = &[
    (
        "package.json",
        &[
            ("@nestjs/core", "nestjs"),
            ("express", "express"),
            ("fastify", "fastify"),
            ("koa", "koa"),
            ("hono", "hono"),
            ("next", "nextjs"),
        ],
    ),
    (
        "pyproject.toml",
        &[("fastapi", "fastapi"), ("django", "django"), ("flask", "flask")],
    ),
    (
        "requirements.txt",
        &[("fastapi", "fastapi"), ("django", "django"), ("flask", "flask")],
    ),
    ("pom.xml", &[("spring-boot", "spring")]),
    ("build.gradle", &[("spring-boot", "spring")]),
    ("build.gradle.kts", &[("spring-boot", "spring")]),
    (
        "go.mod",
        &[
            ("gin-gonic/gin", "gin"),
            ("labstack/echo", "echo"),
            ("gofiber/fiber", "fiber"),
        ],
    ),
    ("Gemfile", &[("rails", "rails")]),
    ("Cargo.toml", &[("axum", "axum"), ("actix-web", "actix")]),
];

const ROUTE_PATTERNS: &[(&str, &[&str])] = &[
    (
        "spring",
        &[
            "**/*Controller.java",
            "**/*Controller.kt",
            "**/*Resource.java",
            "**/*Resource.kt",
        ],
    ),
    ("nestjs", &["**/*.controller.ts", "**/*.controller.js"]),
    (
        "express",
        &[
            "**/routes/**/*.ts",
            "**/routes/**/*.js",
            "**/*.router.ts",
            "**/*.router.js",
        ],
    ),
    (
        "fastify",
        &[
            "**/routes/**/*.ts",
            "**/routes/**/*.js",
            "**/*.route.ts",
            "**/*.route.js",
        ],
    ),
    (
        "koa",
        &["**/routes/**/*.ts", "**/routes/**/*.js", "**/*.router.ts"],
    ),
    ("hono", &["**/routes/**/*.ts", "**/*.route.ts"]),
    (
        "nextjs",
        &[
            "**/app/**/route.ts",
            "**/app/**/route.js",
            "**/pages/api/**/*.ts",
            "**/pages/api/**/*.js",
        ],
    ),
    (
        "fastapi",
        &[
            "**/routers/**/*.py",
            "**/routes/**/*.py",
            "**/api/**/*.py",
            "**/endpoints/**/*.py",
        ],
    ),
    (
        "django",
        &[
            "**/views.py",
            "**/urls.py",
            "**/api/**/*.py",
            "**/views/**/*.py",
        ],
    ),
    ("flask", &["**/routes.py", "**/views.py", "**/api/**/*.py"]),
    ("gin", &["**/handler*.go", "**/routes*.go", "**/api/**/*.go"]),
    ("echo", &["**/handler*.go", "**/routes*.go", "**/api/**/*.go"]),
    ("fiber", &["**/handler*.go", "**/routes*.go", "**/api/**/*.go"]),
    ("rails", &["**/controllers/**/*.rb", "**/routes.rb"]),
    ("axum", &["**/handlers/**/*.rs", "**/routes.rs", "**/api/**/*.rs"]),
    ("actix", &["**/handlers/**/*.rs", "**/routes.rs", "**/api/**/*.rs"]),
];

const GENERIC_ROUTE_PATTERNS: &[&str] = &[
    "**/*controller*.*",
    "**/*Controller*.*",
    "**/routes/**",
    "**/*router*.*",
    "**/*handler*.*",
    "**/api/**",
];

const SCHEMA_PATTERNS: &[(&str, &[&str])] = &[
    (
        "spring",
        &[
            "**/dto/**/*.java",
            "**/dto/**/*.kt",
            "**/entity/**/*.java",
            "**/entity/**/*.kt",
            "**/model/**/*.java",
            "**/model/**/*.kt",
        ],
    ),
    (
        "nestjs",
        &[
            "**/*.dto.ts",
            "**/*.entity.ts",
            "**/*.schema.ts",
            "**/models/**/*.ts",
        ],
    ),
    (
        "express",
        &[
            "**/*.dto.ts",
            "**/*.model.ts",
            "**/models/**/*.ts",
            "**/schemas/**/*.ts",
        ],
    ),
    (
        "fastapi",
        &["**/models/**/*.py", "**/schemas/**/*.py", "**/dto/**/*.py"],
    ),
    (
        "django",
        &["**/models.py", "**/serializers.py", "**/models/**/*.py"],
    ),
    ("flask", &["**/models.py", "**/schemas.py", "**/models/**/*.py"]),
    (
        "gin",
        &["**/models/**/*.go", "**/dto/**/*.go", "**/types/**/*.go"],
    ),
    ("rails", &["**/models/**/*.rb", "**/serializers/**/*.rb"]),
];

const GENERIC_SCHEMA_PATTERNS: &[&str] = &[
    "**/*.dto.*",
    "**/*.entity.*",
    "**/*.schema.*",
    "**/models/**",
    "**/schemas/**",
    "**/entities/**",
    "**/dto/**",
];

const MIDDLEWARE_PATTERNS: &[&str] = &[
    "**/*auth*.*",
    "**/*middleware*.*",
    "**/*security*.*",
    "**/*guard*.*",
    "**/*interceptor*.*",
    "**/middleware/**",
];

const CONFIG_PATTERNS: &[&str] = &[
    "**/application.yml",
    "**/application.yaml",
    "**/application.properties",
    "**/application-*.yml",
    ".env.example",
    ".env.sample",
    "**/config/server*.*",
    "**/config/app*.*",
];

/// Routing idioms counted as endpoint definitions. Combined into a single
/// alternation; a line matching several idioms may be counted more than once.
pub const ENDPOINT_PATTERNS: &[&str] = &[
    // Spring
    r"@(Get|Post|Put|Patch|Delete)Mapping",
    r"@RequestMapping",
    // NestJS decorators
    r"@(Get|Post|Put|Patch|Delete|Head|Options)\(",
    // Express / Koa / Fastify method calls
    r"\.(get|post|put|patch|delete|head|options)\s*\(",
    // FastAPI / Flask
    r"@(app|router|blueprint)\.(get|post|put|patch|delete)\(",
    // Django urls
    r"path\s*\(",
    // Go handler registration
    r"\.(GET|POST|PUT|PATCH|DELETE|Handle|HandleFunc)\(",
];

/// Type declaration idioms counted as schema definitions.
pub const SCHEMA_DECLARATION_PATTERN: &str = r"(?:^|\n)\s*(?:export\s+)?(?:class|interface|type|struct|data\s+class|record|@dataclass|class\s+\w+\(BaseModel\))\s+\w+";

/// The kind of file a selection pass is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Route and controller definitions
    Routes,
    /// DTOs, entities and models
    Schemas,
    /// Authentication, guards and other middleware
    Middleware,
    /// Server configuration files
    Config,
}

impl Role {
    /// Resolves the ordered glob patterns for this role.
    ///
    /// Routes and schemas put the framework's own patterns first and the
    /// generic ones after; middleware and config only have generic patterns.
    pub fn patterns(self, framework: &str) -> Vec<&'static str> {
        let (specific, generic): (&[(&str, &[&str])], &[&str]) = match self {
            Role::Routes => (ROUTE_PATTERNS, GENERIC_ROUTE_PATTERNS),
            Role::Schemas => (SCHEMA_PATTERNS, GENERIC_SCHEMA_PATTERNS),
            Role::Middleware => (&[], MIDDLEWARE_PATTERNS),
            Role::Config => (&[], CONFIG_PATTERNS),
        };

        let mut patterns: Vec<&'static str> = specific
            .iter()
            .find(|(name, _)| *name == framework)
            .map(|(_, list)| list.to_vec())
            .unwrap_or_default();
        patterns.extend_from_slice(generic);
        patterns
    }

    /// Maximum number of files selected for this role.
    pub fn max_files(self, limits: &Limits) -> usize {
        match self {
            Role::Routes => limits.max_route_files,
            Role::Schemas => limits.max_schema_files,
            Role::Middleware => limits.max_middleware_files,
            Role::Config => limits.max_config_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_route_patterns_put_framework_first() {
        let patterns = Role::Routes.patterns("nestjs");
        assert_eq!(patterns[0], "**/*.controller.ts");
        assert_eq!(patterns[1], "**/*.controller.js");
        assert_eq!(&patterns[2..], GENERIC_ROUTE_PATTERNS);
    }

    #[test]
    fn test_unknown_framework_uses_generic_patterns() {
        assert_eq!(Role::Routes.patterns(UNKNOWN_FRAMEWORK), GENERIC_ROUTE_PATTERNS.to_vec());
        assert_eq!(Role::Schemas.patterns(UNKNOWN_FRAMEWORK), GENERIC_SCHEMA_PATTERNS.to_vec());
    }

    #[test]
    fn test_middleware_and_config_ignore_framework() {
        assert_eq!(Role::Middleware.patterns("spring"), MIDDLEWARE_PATTERNS.to_vec());
        assert_eq!(Role::Config.patterns("spring"), CONFIG_PATTERNS.to_vec());
    }

    #[test]
    fn test_framework_without_schema_table() {
        // echo has route patterns but no schema patterns of its own
        assert_eq!(Role::Schemas.patterns("echo"), GENERIC_SCHEMA_PATTERNS.to_vec());
        assert!(Role::Routes.patterns("echo").contains(&"**/handler*.go"));
    }

    #[test]
    fn test_max_files_per_role() {
        let limits = Limits::default();
        assert_eq!(Role::Routes.max_files(&limits), 30);
        assert_eq!(Role::Schemas.max_files(&limits), 30);
        assert_eq!(Role::Middleware.max_files(&limits), 15);
        assert_eq!(Role::Config.max_files(&limits), 10);
    }

    #[test]
    fn test_every_pattern_compiles() {
        let tables = ROUTE_PATTERNS.iter().chain(SCHEMA_PATTERNS.iter());
        for (_, patterns) in tables {
            for pattern in patterns.iter() {
                assert!(crate::glob::GlobPattern::new(pattern).is_ok(), "{}", pattern);
            }
        }
        for pattern in GENERIC_ROUTE_PATTERNS
            .iter()
            .chain(GENERIC_SCHEMA_PATTERNS)
            .chain(MIDDLEWARE_PATTERNS)
            .chain(CONFIG_PATTERNS)
        {
            assert!(crate::glob::GlobPattern::new(pattern).is_ok(), "{}", pattern);
        }
    }
}
