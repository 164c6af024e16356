//! Prompt template for the coordination step

/// Templates for the coordinator
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt asking the coordinator to pick agents.
    ///
    /// The answer format uses the `Thought:` / `Action:` / `Observation:` /
    /// `Decision:` markers that the routing parser looks for.
    pub fn coordinator(request: &str, context_json: &str) -> String {
        format!(
            r#"You are the coordinator of a team of academic support agents.
Decide which agents should handle the student's request and how they can be grouped.

AVAILABLE AGENTS:
- PLANNER: scheduling and time management (always involved)
- NOTEWRITER: study notes and content summaries
- ADVISOR: personalized academic guidance; builds on the plan, so it runs after planning

GROUPING:
- Agents in the same group run at the same time and cannot see each other's output
- Later groups start only after earlier groups finish

CONSIDER:
1. Scope and complexity of the request
2. Time constraints
3. Learning style of the student
4. Kind of support needed

REQUEST:
{request}

STUDENT CONTEXT:
{context_json}

Respond exactly in this format:
Thought: [what the student needs]
Action: [which agents and how they are grouped]
Observation: [expected workflow and dependencies]
Decision: [final agent deployment with rationale]"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_prompt_embeds_inputs() {
        let prompt = PromptTemplate::coordinator("Exam tomorrow", "{\"major\": \"CS\"}");
        assert!(prompt.contains("Exam tomorrow"));
        assert!(prompt.contains("\"major\": \"CS\""));
    }

    #[test]
    fn test_coordinator_prompt_lists_markers() {
        let prompt = PromptTemplate::coordinator("x", "{}");
        for marker in ["Thought:", "Action:", "Observation:", "Decision:"] {
            assert!(prompt.contains(marker), "missing {marker}");
        }
        for agent in ["PLANNER", "NOTEWRITER", "ADVISOR"] {
            assert!(prompt.contains(agent));
        }
    }
}
