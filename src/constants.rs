//! Common constants used throughout netbake.

/// Folders created inside the API project, each with a `.gitkeep`
pub const API_FOLDERS: [&str; 11] = [
    "Controllers",
    "Data",
    "Dto",
    "Entities",
    "Error",
    "Extensions",
    "Helpers",
    "Interfaces",
    "Middleware",
    "Repositories",
    "Tests",
];

/// Placeholder file that keeps empty folders under version control
pub const GITKEEP_FILE: &str = ".gitkeep";

/// Default port for the generated launch profiles
pub const DEFAULT_PORT: u16 = 5000;

/// The https profile serves plain http on `port + SECONDARY_PORT_OFFSET`
pub const SECONDARY_PORT_OFFSET: u16 = 1000;

/// Default name of the initial EF Core migration
pub const DEFAULT_MIGRATION: &str = "InitialCreate";

/// Value reported for fields that did not match
pub const NOT_FOUND: &str = "No encontrado";

/// External SDK executable
pub const DOTNET: &str = "dotnet";
