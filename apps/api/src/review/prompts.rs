// Prompts for the resume review call. The two-section layout is what
// `parser::parse_ai_response` splits on; keep the `1)` / `2)` markers in sync.

pub const REVIEW_SYSTEM: &str = "You are an expert recruiter and career coach. \
    You follow the requested output format exactly and add no text outside it.";

/// Placeholders: `{resume_html}`, `{job_title}`.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Below, delimited by [[ ]], are the inputs:
- [[{resume_html}]]: the candidate's current resume in raw HTML form.
- [[{job_title}]]: the role the candidate is applying for.

Generate exactly two sections in your output:

1) **Analysis and Feedback**
- Critique the resume structure, content, and formatting relative to the role.
- Identify strengths and areas for improvement (e.g., missing keywords, weak bullets, layout issues).
- Provide specific, actionable suggestions to optimize each section (summary, experience, skills, education) for the target role and ATS.

2) **RevisedResumeHTML**
- Produce a complete HTML document (including `<head>` and CSS) that preserves the original content hierarchy but restyles everything to improve the resume for the target role. Keep it simple, basic and functional.
- Do not include any explanation, only the updated HTML.

Output format (no extra text):

1)
<detailed analysis and feedback>

2)
<!DOCTYPE html> <html> <head> <!-- CSS to improve the resume for the target role --> </head> <body> <!-- Restyled resume content --> </body> </html>
"#;

pub fn build_review_prompt(resume_html: &str, job_title: &str) -> String {
    // job_title first: resume HTML is untrusted and may contain the literal placeholder
    REVIEW_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{resume_html}", resume_html)
}
