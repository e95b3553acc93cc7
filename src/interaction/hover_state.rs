use crate::{geofile::feature::FeatureMap, map::layer_group::LayerKind};

/// Attributes of the currently hovered feature, tracked independently per layer kind since zoning and
/// school layers overlap.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HoverState {
    zoning: Option<FeatureMap>,
    school: Option<FeatureMap>,
}

impl HoverState {
    pub fn get(&self, kind: LayerKind) -> Option<&FeatureMap> {
        self.slot(kind).as_ref()
    }

    pub fn set(&mut self, kind: LayerKind, attributes: FeatureMap) {
        *self.slot_mut(kind) = Some(attributes);
    }

    pub fn clear(&mut self, kind: LayerKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.zoning.is_none() && self.school.is_none()
    }

    fn slot(&self, kind: LayerKind) -> &Option<FeatureMap> {
        match kind {
            LayerKind::Zoning => &self.zoning,
            LayerKind::School => &self.school,
        }
    }

    fn slot_mut(&mut self, kind: LayerKind) -> &mut Option<FeatureMap> {
        match kind {
            LayerKind::Zoning => &mut self.zoning,
            LayerKind::School => &mut self.school,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::HoverState;
    use crate::map::layer_group::LayerKind;

    #[rstest]
    fn test_kinds_are_independent() {
        let mut state = HoverState::default();
        assert!(state.is_empty());

        let zoning = HashMap::from([("ZONING".to_string(), "R1".to_string())]);
        let school = HashMap::from([("school_name".to_string(), "Ridge Hill".to_string())]);
        state.set(LayerKind::Zoning, zoning.clone());
        state.set(LayerKind::School, school.clone());
        assert_eq!(Some(&zoning), state.get(LayerKind::Zoning));
        assert_eq!(Some(&school), state.get(LayerKind::School));

        state.clear(LayerKind::Zoning);
        assert_eq!(None, state.get(LayerKind::Zoning));
        assert_eq!(Some(&school), state.get(LayerKind::School));
        assert!(!state.is_empty());

        state.clear(LayerKind::School);
        assert!(state.is_empty());
    }
}
