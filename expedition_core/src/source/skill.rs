//! SkillSource - Passive stat effects of held skills
//!
//! Conditional effects (Berserk, Second Wind, initiative overrides) depend on
//! combat state and are queried by the combat resolver instead.

use crate::config::SkillCatalogue;
use crate::skill::SkillSet;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;

pub struct SkillSource<'a> {
    pub skills: &'a SkillSet,
    pub catalogue: &'a SkillCatalogue,
}

impl<'a> SkillSource<'a> {
    pub fn new(skills: &'a SkillSet, catalogue: &'a SkillCatalogue) -> Self {
        SkillSource { skills, catalogue }
    }
}

impl StatSource for SkillSource<'_> {
    fn id(&self) -> &str {
        "skills"
    }

    fn priority(&self) -> i32 {
        super::SKILL_PRIORITY
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for effect in self.skills.held().filter_map(|k| self.catalogue.effect(k)) {
            stats.accuracy_penalty += effect.accuracy_penalty();
            stats.leech += effect.leech();
            stats.reflect += effect.reflect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;
    use crate::skill::SkillKind;

    #[test]
    fn test_bold_costs_accuracy() {
        let data = GameData::builtin();
        let mut skills = SkillSet::empty(&data.skills);
        skills.grant(SkillKind::Bold);

        let mut acc = StatAccumulator::new();
        SkillSource::new(&skills, &data.skills).apply(&mut acc);
        assert!((acc.accuracy_penalty - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unheld_skills_contribute_nothing() {
        let data = GameData::builtin();
        let skills = SkillSet::empty(&data.skills);

        let mut acc = StatAccumulator::new();
        SkillSource::new(&skills, &data.skills).apply(&mut acc);
        assert!((acc.accuracy_penalty - 0.0).abs() < f64::EPSILON);
        assert!((acc.reflect - 0.0).abs() < f64::EPSILON);
    }
}
