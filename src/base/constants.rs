//! Names of the model-declaration vocabulary.
//!
//! Constructors and wrappers are recognised by these names, either as a
//! member of the configured namespace (`types.model`) or as a bare call.

/// Default namespace object the vocabulary hangs off
pub const DEFAULT_NAMESPACE: &str = "types";

/// Default name of the asynchronous-generator-wrapping helper
pub const DEFAULT_ASYNC_HELPER: &str = "flow";

/// Default parent symbol for emitted typedefs
pub const DEFAULT_PARENT: &str = "Object";

// ============================================================================
// CONSTRUCTORS
// ============================================================================

pub const MODEL: &str = "model";
pub const COMPOSE: &str = "compose";

// ============================================================================
// CHAIN METHODS
// ============================================================================

pub const ACTIONS: &str = "actions";
pub const VIEWS: &str = "views";
pub const PROPS: &str = "props";
pub const NAMED: &str = "named";

// ============================================================================
// LEAVES
// ============================================================================

pub const STRING: &str = "string";
pub const IDENTIFIER: &str = "identifier";
pub const NUMBER: &str = "number";
pub const IDENTIFIER_NUMBER: &str = "identifierNumber";
pub const FINITE: &str = "finite";
pub const FLOAT: &str = "float";
pub const INTEGER: &str = "integer";
pub const BOOLEAN: &str = "boolean";
pub const DATE: &str = "Date";
pub const NULL: &str = "null";
pub const UNDEFINED: &str = "undefined";

// ============================================================================
// WRAPPERS
// ============================================================================

pub const ARRAY: &str = "array";
pub const MAP: &str = "map";
pub const OPTIONAL: &str = "optional";
pub const MAYBE: &str = "maybe";
pub const MAYBE_NULL: &str = "maybeNull";
pub const REFERENCE: &str = "reference";
pub const SAFE_REFERENCE: &str = "safeReference";
pub const LATE: &str = "late";
pub const FROZEN: &str = "frozen";
pub const LITERAL: &str = "literal";
pub const ENUMERATION: &str = "enumeration";
pub const REFINEMENT: &str = "refinement";
pub const CUSTOM: &str = "custom";
pub const UNION: &str = "union";
pub const SNAPSHOT_PROCESSOR: &str = "snapshotProcessor";

/// Property of a `custom({...})` config holding the display name
pub const CUSTOM_NAME_KEY: &str = "name";
