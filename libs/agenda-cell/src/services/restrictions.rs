use chrono::NaiveTime;

use crate::models::{Procedure, RestrictionRule, RestrictionType, Slot};

/// Request-time facts the restriction rules are evaluated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictionContext<'a> {
    pub plan_id: Option<i64>,
    /// `None` when no procedure was requested or the id matched no procedure.
    pub procedure: Option<&'a Procedure>,
}

impl RestrictionContext<'_> {
    fn procedure_requires_contrast(&self) -> bool {
        self.procedure.map_or(false, |procedure| procedure.requires_contrast)
    }
}

/// Keep the slots that satisfy every restriction whose window covers them.
///
/// Rules are evaluated in the given order and a slot is dropped at the first rule
/// it violates.
pub fn apply_restrictions(
    slots: &[Slot],
    rules: &[RestrictionRule],
    context: &RestrictionContext<'_>,
) -> Vec<Slot> {
    if rules.is_empty() {
        return slots.to_vec();
    }

    slots
        .iter()
        .copied()
        .filter(|slot| first_violation(slot.time(), rules, context).is_none())
        .collect()
}

/// First rule covering `time` that rejects the request, if any.
pub fn first_violation<'r>(
    time: NaiveTime,
    rules: &'r [RestrictionRule],
    context: &RestrictionContext<'_>,
) -> Option<&'r RestrictionRule> {
    rules
        .iter()
        .filter(|rule| rule.applies_at(time))
        .find(|rule| !permits(rule, context))
}

fn permits(rule: &RestrictionRule, context: &RestrictionContext<'_>) -> bool {
    match rule.restriction_type {
        RestrictionType::RestrictToPlan => context.plan_id == rule.reference_id,
        RestrictionType::ExcludePlan => context.plan_id != rule.reference_id,
        RestrictionType::ContrastRequired => context.procedure_requires_contrast(),
        RestrictionType::ContrastForbidden => !context.procedure_requires_contrast(),
        RestrictionType::Unrecognized => true,
    }
}
