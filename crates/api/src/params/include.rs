//! Relationship includes.
//!
//! `include=authors,tags` names the content types to embed as compound
//! resources. Every name must be a configured relation target of the primary
//! type; an unknown name aborts the whole request rather than being silently
//! dropped.

use strata_store::ContentSchema;

use super::CompileError;

/// Compiles the `include` parameter into a validated, de-duplicated list.
pub fn compile(
    requested: Option<&str>,
    content_type: &str,
    schema: &ContentSchema,
) -> Result<Vec<String>, CompileError> {
    let mut includes: Vec<String> = Vec::new();

    let Some(requested) = requested.filter(|s| !s.trim().is_empty()) else {
        return Ok(includes);
    };

    for name in requested.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !schema.is_relation(content_type, name) {
            return Err(CompileError::InvalidInclude {
                include: name.to_string(),
                content_type: content_type.to_string(),
            });
        }
        if !includes.iter().any(|existing| existing == name) {
            includes.push(name.to_string());
        }
    }

    Ok(includes)
}
