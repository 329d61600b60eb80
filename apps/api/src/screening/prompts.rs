// All LLM prompt constants for the screening pipeline.
// Stage modules compose these with the cross-cutting fragments from
// llm_client::prompts when they build their stage specs.

/// Job requirements every résumé is measured against.
pub const JOB_REQUIREMENTS: &str = r#"Minimal requirements for the AI engineer position:
1. Work across the AI lifecycle: from data preparation and model development to evaluation and deployment.
2. Fine-tune and integrate LLMs (like OpenAI and Gemini) into ERP workflows.
3. Build smart features such as recommendation engines, forecasting modules, NLP tools, and more.
Preferred requirements:
Develop and maintain scalable cloud-based AI solutions across multi-cloud platforms (AWS, GCP, Azure)."#;

/// Instruction for the match analysis stage. The résumé is the first user
/// turn of the conversation.
pub const MATCH_ANALYSIS_INSTRUCTION: &str = r#"Compare and match the candidate's curriculum vitae above against the job requirements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "minimal_requirements_analysis": "Requirement 1: ... Requirement 2: ... Requirement n: ... (one entry per minimal requirement)",
  "preferred_requirements_analysis": "How the candidate measures against the preferred requirements",
  "strengths": "Strengths of the candidate for this position",
  "potential_gaps": "Potential gaps of the candidate for this position",
  "candidate_name": "The candidate's name as written in the CV"
}"#;

/// Instruction for the score assignment stage.
pub const SCORE_INSTRUCTION: &str = r#"Based on your analysis above, score how well the candidate matches the AI engineer position for the next step of the recruitment process.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": <a whole number between 0 and 10 ONLY, without any additions>
}"#;

/// Instruction for composing a rejection email. Only the name placeholder
/// appears here; rejected candidates get no interview details.
pub const REJECTION_EMAIL_INSTRUCTION: &str = r#"The candidate will not proceed to the next step. Create a very simple rejection email for the AI engineer position.

Use the literal placeholder [CANDIDATE_NAME] for the candidate's name. Write the email body in this structure:
Hello, [CANDIDATE_NAME]

........

Thanks,
The Recruiting Team.

Return a JSON object with this EXACT schema (no extra fields):
{
  "email": "<the full email body>"
}"#;

/// Instruction for composing an interview invitation email. Date and time
/// placeholders are filled in deterministically after the call.
pub const INVITATION_EMAIL_INSTRUCTION: &str = r#"The candidate is accepted to the next step of the AI engineer position. Create an interview invitation email.

Use the literal placeholders [CANDIDATE_NAME], [INTERVIEW_DATE] and [INTERVIEW_TIME]. Write the email body in this structure:
Hello, [CANDIDATE_NAME]

........

Date : [INTERVIEW_DATE]
Time : [INTERVIEW_TIME]
Google Meet interview link : https://bit.ly/sift-interview

........

Thanks,
The Recruiting Team.

Return a JSON object with this EXACT schema (no extra fields):
{
  "email": "<the full email body>"
}"#;

/// Instruction for the interview questions stage. Only runs for invited
/// candidates; rejected runs never reach the model for this stage.
pub const QUESTIONS_INSTRUCTION: &str = r#"Create 3 interview questions grounded in the candidate's curriculum vitae above.

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": "QUESTION 1 : ........ \nQUESTION 2 : ........ \nQUESTION 3 : ........ \n"
}"#;
