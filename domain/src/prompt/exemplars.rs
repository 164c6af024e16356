//! Few-shot exemplars embedded in the synthesis prompts.
//!
//! Static and agent-specific; each agent takes its set once at construction.

/// One worked example shown to the model before the real request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exemplar {
    pub request: &'static str,
    pub observation: &'static str,
    pub response: &'static str,
}

pub const PLANNER_EXEMPLARS: &[Exemplar] = &[
    Exemplar {
        request: "Exam prep while managing ADHD and a football match",
        observation: "Match at 6PM today, exam at 9AM tomorrow",
        response: "FOCUS-FRIENDLY SCHEDULE
BEFORE THE MATCH (2PM-5PM):
- Three 20 minute study sprints with movement breaks
- Small reward after each sprint
MATCH (6PM-8PM):
- Treat it as a reset; glance at formulas at half time
AFTER THE MATCH (9PM-11PM):
- 15/5 study/break cycles in a new location
IF FOCUS SLIPS:
- Lost focus: quick exercise
- Overwhelmed: change rooms",
    },
    Exemplar {
        request: "Struggling with several deadlines at once",
        observation: "Three assignments due this week, weakest grade in Calculus",
        response: "PRIORITY SCHEDULE
- Mornings: Calculus practice while energy is highest
- Afternoons: assignments in order of due date
- Evenings: short review only
- Timer challenge and a reward for every finished task",
    },
];

pub const NOTEWRITER_EXEMPLARS: &[Exemplar] = &[Exemplar {
    request: "Need to cram Calculus III for tomorrow",
    observation: "Quick review format, visual learner",
    response: "CALCULUS III ESSENTIALS
1. CORE IDEAS
   - Multiple integrals: area and volume
   - Vector calculus: flux, work, rotation
2. TYPICAL EXAM QUESTIONS
   - Critical points
   - Flux and work integrals
   - Constrained optimization
3. QUICK TIPS
   - Sketch the region in 3D first
   - Use symmetry to simplify
   - Stuck? Try another coordinate system",
}];

pub const ADVISOR_EXEMPLARS: &[Exemplar] = &[Exemplar {
    request: "Managing multiple deadlines with limited time",
    observation: "Visual learner, heavy workload: two hackathons, a project and an exam",
    response: "PRIORITY-BASED GUIDANCE
1. RIGHT NOW
   - Draw a timeline of every deadline
   - Split each task into 45 minute chunks
2. WORKLOAD
   - Hackathons: agree on roles early
   - Project: one focused 2 hour block per day
   - Exam: interleaved practice
3. ENERGY
   - 25/5 Pomodoro for heavy tasks
   - Move between study blocks
4. WHEN THINGS GO WRONG
   - Overwhelmed: 10 minute reset
   - Stuck: switch task or place",
}];

/// Render exemplars as a numbered plain-text block
pub fn render(exemplars: &[Exemplar]) -> String {
    exemplars
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "Example {}\nRequest: {}\nObservation: {}\nResponse:\n{}",
                i + 1,
                e.request,
                e.observation,
                e.response
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
