// Defaults for the evaluator configuration

/// Deepest chain of non-tail calls before evaluation fails with
/// stack exhaustion. Tail calls never count against it.
///
/// A non-tail level costs roughly 18 KiB of native stack in a debug build,
/// so 48 levels stay well inside a 2 MiB thread stack. Hosts running on a
/// larger stack can raise it with `EvalConfig::with_max_call_depth`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 48;
