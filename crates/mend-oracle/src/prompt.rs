//! Prompt builder for code-repair requests
//!
//! Two deliberately distinct shapes: a first-pass cleanup prompt when no
//! prior error exists, and a targeted-fix prompt that embeds the diagnostic
//! when one does. The oracle behaves differently for each, so the branch
//! must stay observable in the request text.

/// Build the repair instruction for a code snippet.
///
/// The instruction uses the Llama-2 chat markup the backing model expects
/// and asks for code only, no prose.
pub fn build_repair_prompt(code: &str, language: &str, prior_error: Option<&str>) -> String {
    let system = format!(
        "You are given a code snippet in {language} that contains syntax errors and logical issues.\n\
         Your task is to fix the code and provide the corrected version as the final result.\n\
         You should not provide any explanation or additional information; only the fixed code should be included in your response."
    );

    match prior_error {
        Some(error) => format!(
            "<s>[INST] <<SYS>>\n{system}\n<</SYS>>\nThe following is input code: {code}.\n[/INST]\nThe error is: {error}.\nAnswer only in {language} code:"
        ),
        None => format!(
            "<s>[INST] <<SYS>>\n{system}\n<</SYS>>\nThe following is input code: {code}.\n[/INST] Answer only in {language} code: "
        ),
    }
}
