/// Whether a mode handled the invocation or the next one should get a turn.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
