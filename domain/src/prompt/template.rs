//! Prompt templates for the debate flow

use crate::agent::AgentProfile;
use crate::debate::response::ResponseUnit;
use crate::debate::stage::Stage;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Task prompt shared by every agent in a round.
    ///
    /// Round 1 asks for an initial, well-sourced perspective; later rounds
    /// ask agents to validate, cross-check and extend what came before.
    pub fn round_task(topic: &str, round: u32) -> String {
        if round <= 1 {
            format!(
                r#"Discuss the following topic and provide your initial perspective with proper citations and sources:

TOPIC: {}

Remember to:
- Provide technical depth and specific examples
- Cite authoritative sources (research papers, documentation, official resources)
- Include URLs or proper citations
- Be precise with technical specifications"#,
                topic
            )
        } else {
            format!(
                r#"Review the previous responses and provide your critical analysis:

TOPIC: {}

Your tasks for Round {}:
- VALIDATE sources provided by other council members
- CROSS-CHECK facts and identify any errors
- CHALLENGE weak arguments with counter-evidence
- BUILD ON strong points with additional sources
- ADDRESS common misconceptions
- PROVIDE new insights with proper citations"#,
                topic, round
            )
        }
    }

    /// Stage-specific guidance appended to every system instruction.
    pub fn stage_guidance(stage: Stage) -> String {
        match stage {
            Stage::Synthesis => r#"Current stage: FINAL SYNTHESIS
- You are writing the council's final article from the full debate transcript
- Integrate every perspective and keep the citations that survived review
- Trace each major claim to a source raised during the discussion"#
                .to_string(),
            stage if stage.is_opening() => r#"Current stage: Round 1 - INITIAL ANALYSIS
- Give your own well-sourced analysis of the topic
- Cite authoritative sources for every significant claim (papers, official documentation, standards)
- Prefer verifiable URLs and precise figures over general statements"#
                .to_string(),
            Stage::Round(n) => format!(
                r#"Current stage: Round {} - CRITICAL REVIEW
- Critically review every previous response shown below
- Cross-check facts and sources; call out errors and unsupported claims
- Extend the strongest arguments with additional evidence"#,
                n
            ),
        }
    }

    /// System-level instruction for one agent turn.
    ///
    /// Combines the agent's identity, the stage guidance and, when there is
    /// any, the attributed rendering of the context it is allowed to see.
    pub fn system_instruction(
        profile: &AgentProfile,
        stage: Stage,
        context: &[ResponseUnit],
    ) -> String {
        let mut prompt = format!(
            r#"You are {}, an expert AI participating in a council discussion.

Your role: {}

Instructions:
1. Provide thoughtful, well-reasoned responses
2. Challenge weak arguments and support strong ones
3. Consider different perspectives
4. Build upon or respectfully critique other council members' points
5. Be specific and provide examples when possible
6. Stay focused on the topic at hand"#,
            profile.name, profile.role
        );

        prompt.push_str("\n\n");
        prompt.push_str(&Self::stage_guidance(stage));

        if !context.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&Self::format_context(context));
        }

        prompt
    }

    /// Attributed rendering of prior responses. Empty context renders as "".
    pub fn format_context(context: &[ResponseUnit]) -> String {
        if context.is_empty() {
            return String::new();
        }

        let mut formatted = String::from("\n\n--- Previous Responses ---\n");
        for response in context {
            formatted.push_str(&format!(
                "\n{} ({}):\n{}\n",
                response.agent_name, response.model, response.content
            ));
        }
        formatted.push_str("\n--- End of Previous Responses ---\n");
        formatted
    }

    /// The fixed synthesis request handed to the synthesizer.
    pub fn synthesis_prompt(topic: &str) -> String {
        format!(
            r#"Based on the council's multi-round discussion on: "{}"

You must now write a COMPREHENSIVE ACADEMIC-STYLE ARTICLE that:

1. **EXECUTIVE SUMMARY**
   - Brief overview of the topic and key findings
   - Main conclusions (2-3 sentences)

2. **INTRODUCTION**
   - Context and importance of the topic
   - Key questions addressed
   - Scope of the analysis

3. **DETAILED ANALYSIS**
   - Synthesize all perspectives presented
   - Include technical details, specifications, and data points
   - Organize by themes or sub-topics
   - Use headings and subheadings

4. **SOURCE VALIDATION & CROSS-CHECKING**
   - Evaluate the quality and reliability of sources cited
   - List VERIFIED sources (URLs, papers, documentation)
   - Note any conflicting sources or disputed claims
   - Rate source credibility (High/Medium/Low with justification)

5. **CONSENSUS & DISAGREEMENTS**
   - Points of strong agreement across council members
   - Areas of disagreement with competing evidence
   - Nuanced perspectives that warrant consideration

6. **COMMON MISCONCEPTIONS ADDRESSED**
   - Identify and correct common misunderstandings about this topic
   - Explain why these misconceptions are wrong
   - Provide correct information with sources

7. **TECHNICAL DEEP DIVE**
   - Detailed technical specifications, benchmarks, or data
   - Implementation considerations
   - Performance characteristics (if applicable)
   - Trade-offs and limitations

8. **GAPS & LIMITATIONS**
   - What the council couldn't fully address
   - Areas requiring further research
   - Acknowledged uncertainties

9. **ACTIONABLE RECOMMENDATIONS**
   - Concrete, specific recommendations
   - Prioritized by importance and feasibility
   - Context-dependent guidance (when to do X vs Y)

10. **VERIFIED REFERENCES & RESOURCES**
    - Complete list of all cited sources
    - Format: [Title/Description] - [URL or Citation] - [Credibility Rating]
    - Organize by category (Research Papers, Documentation, Tools, etc.)

11. **CONCLUSION**
    - Summary of findings
    - Final verdict or recommendations
    - Future outlook

**FORMAT REQUIREMENTS:**
- Use Markdown formatting with proper headers (##, ###)
- Include bullet points and numbered lists where appropriate
- Make it readable, comprehensive, and academically rigorous
- Minimum 1000 words for complex topics
- Every major claim should reference a source from the debate
- Be thorough, objective, and balanced

Generate the complete article now:"#,
            topic
        )
    }
}
