//! Locate the insertion point after a static call, then hand a snippet to a weaver
//!
//! For one method of one class, the steps are:
//!
//!   1. resolve which `CONSTANT_Class` entry for the callee's class is really used
//!   2. encode the `invokestatic` a call to the callee compiles to (one per equivalent reference)
//!   3. scan the method's bytecode for the last such instruction
//!   4. map its offset onto the line number table, picking the line after the call
//!
//! Every failure along the way turns into [`PatchOutcome::Skipped`]. The class is only ever read,
//! so a skipped method is exactly as it was.

mod errors;
mod line_map;
mod repository;
mod resolver;
mod settings;
mod weaver;

pub use errors::*;
pub use line_map::*;
pub use repository::*;
pub use resolver::*;
pub use settings::*;
pub use weaver::*;

use crate::jvm::class_file::ClassFile;
use crate::jvm::code::{encode_static_invoke, find_last_occurrence};
use crate::jvm::Name;

#[derive(Debug)]
pub enum PatchOutcome {
    Patched { line: u16 },
    Skipped(SkipReason),
}

/// Where the call was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Bytecode offset of the `invokestatic`
    pub offset: u16,

    /// Line at which to insert code that should run after the call
    pub insertion_line: u16,
}

/// Find the call site in an already loaded class
pub fn locate_call_site(
    class: &ClassFile,
    request: &PatchRequest,
) -> Result<CallSite, SkipReason> {
    let constants = &class.constants;
    let method = class
        .method(request.target_method.as_str())
        .ok_or_else(|| SkipReason::MethodNotFound(request.target_method.clone()))?;
    let code = method.code(constants)?.ok_or(SkipReason::MissingCode)?;
    let line_numbers = code.line_numbers(constants)?;
    if line_numbers.is_empty() {
        return Err(SkipReason::MissingLineNumbers);
    }
    log::debug!(
        "{} has {} bytes of code and {} line number entries",
        request.target_method,
        code.code_array.0.len(),
        line_numbers.entries().len()
    );

    let owner = resolve_class(constants, &request.callee_owner)?;
    let needles = encode_static_invoke(
        constants,
        owner,
        request.callee_name.as_str(),
        &request.callee_descriptor,
    )?;
    log::debug!("looking for {:?}", needles);

    let offset = find_last_occurrence(&code.code_array.0, &needles)?
        .ok_or(SkipReason::InstructionNotFound)?;
    let insertion_line = insertion_line_after(&line_numbers, offset)?;
    log::debug!(
        "call at offset {}, inserting at line {}",
        offset,
        insertion_line
    );

    Ok(CallSite {
        offset,
        insertion_line,
    })
}

/// Load the target class, locate the call, and ask the weaver to insert the snippet after it
pub fn patch<R, W>(repository: &R, weaver: &mut W, request: &PatchRequest) -> PatchOutcome
where
    R: ClassRepository + ?Sized,
    W: Weaver + ?Sized,
{
    match try_patch(repository, weaver, request) {
        Ok(line) => {
            log::info!(
                "Patched {}.{} at line {}",
                request.target_class,
                request.target_method,
                line
            );
            PatchOutcome::Patched { line }
        }
        Err(reason) => {
            log::warn!(
                "Skipping {}.{}: {}",
                request.target_class,
                request.target_method,
                reason
            );
            PatchOutcome::Skipped(reason)
        }
    }
}

fn try_patch<R, W>(
    repository: &R,
    weaver: &mut W,
    request: &PatchRequest,
) -> Result<u16, SkipReason>
where
    R: ClassRepository + ?Sized,
    W: Weaver + ?Sized,
{
    let class = repository.load(&request.target_class)?;
    let site = locate_call_site(&class, request)?;
    let snippet = request.snippet.render();
    log::trace!("snippet: {}", snippet);
    weaver.insert_at(
        &request.target_class,
        &request.target_method,
        site.insertion_line,
        &snippet,
    )?;
    Ok(site.insertion_line)
}
