//! Prompt templates for the agent stages.
//!
//! Each function builds the full message list for one text-generation call.

use super::exemplars::{Exemplar, render};
use crate::state::message::Message;
use serde_json::Value;

/// Templates for the per-agent stage prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// Planner stage 1: upcoming events only
    pub fn calendar_analysis(events: &[Value]) -> Vec<Message> {
        vec![
            Message::system(
                r#"Analyze the student's upcoming calendar events and identify:
- Free time blocks and study windows
- Energy impact of each activity
- Conflicts and recovery periods
- Patterns worth optimizing

The events are given as JSON in the next message."#,
            ),
            Message::user(to_json(&Value::Array(events.to_vec()))),
        ]
    }

    /// Planner stage 2: task list as-is
    pub fn task_analysis(tasks: &[Value]) -> Vec<Message> {
        vec![
            Message::system(
                r#"Analyze the student's tasks and build a priority structure considering:
- Urgency and due dates
- Complexity and required focus
- Dependencies between tasks
- Time estimates

The tasks are given as JSON in the next message."#,
            ),
            Message::user(to_json(&Value::Array(tasks.to_vec()))),
        ]
    }

    /// Planner stage 3: combine the analyses into a plan
    pub fn plan_synthesis(
        profile_analysis: &Value,
        calendar_analysis: &Value,
        task_analysis: &Value,
        exemplars: &[Exemplar],
        request: &str,
    ) -> Vec<Message> {
        let system = format!(
            r#"You are a planning assistant. Build a focused, realistic study plan.

PROFILE ANALYSIS:
{profile}

CALENDAR ANALYSIS:
{calendar}

TASK ANALYSIS:
{tasks}

EXAMPLES:
{examples}

The plan should cover energy management, task chunking, focus periods,
recovery time, balance with social and sport activities, and a backup
strategy for when things slip. Keep the tone informal.

FORMAT:
Thought: [situation analysis]
Action: [how you combine the analyses]
Observation: [key findings]
Plan: [actionable steps and schedule]"#,
            profile = to_json(profile_analysis),
            calendar = to_json(calendar_analysis),
            tasks = to_json(task_analysis),
            examples = render(exemplars),
        );
        vec![Message::system(system), Message::user(request)]
    }

    /// NoteWriter stage 1: decide the note structure
    pub fn learning_analysis(learning_style: &Value, request: &str) -> Vec<Message> {
        vec![Message::system(format!(
            r#"Decide the best note structure for this student.

LEARNING STYLE:
{style}

REQUEST:
{request}

Cover:
1. Key topics (the 20% that gives 80% of understanding)
2. Adaptations for the learning style
3. Time management for studying the notes
4. Quick reference format"#,
            style = to_json(learning_style),
        ))]
    }

    /// NoteWriter stage 2: write the notes
    pub fn note_synthesis(
        analysis: &str,
        learning_style: &Value,
        exemplars: &[Exemplar],
        request: &str,
    ) -> Vec<Message> {
        vec![Message::system(format!(
            r#"Write concise, high-impact study notes.

ANALYSIS:
{analysis}

LEARNING STYLE:
{style}

REQUEST:
{request}

EXAMPLES:
{examples}

Structure the notes with core concepts, daily focus areas and last-minute tips."#,
            style = to_json(learning_style),
            examples = render(exemplars),
        ))]
    }

    /// Advisor stage 1: understand the student's situation
    pub fn situation_analysis(
        profile: &Value,
        learning_preferences: &Value,
        request: &str,
    ) -> Vec<Message> {
        vec![Message::system(format!(
            r#"Analyze the student's situation and decide how to guide them.

PROFILE:
{profile}

LEARNING PREFERENCES:
{preferences}

REQUEST:
{request}

Analyze:
1. Current challenges
2. Fit with the learning style
3. Time management needs
4. Stress management needs"#,
            profile = to_json(profile),
            preferences = to_json(learning_preferences),
        ))]
    }

    /// Advisor stage 2: write the guidance
    pub fn guidance_synthesis(analysis: &str, exemplars: &[Exemplar]) -> Vec<Message> {
        vec![Message::system(format!(
            r#"Write personalized academic guidance based on this analysis.

ANALYSIS:
{analysis}

EXAMPLES:
{examples}

FORMAT:
1. Immediate action steps
2. Schedule optimization
3. Energy management
4. Support strategies
5. What to do when things go wrong"#,
            examples = render(exemplars),
        ))]
    }
}

fn to_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
