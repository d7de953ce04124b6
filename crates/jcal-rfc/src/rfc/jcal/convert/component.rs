use super::Converter;
use crate::rfc::ical::core::Component;
use crate::rfc::jcal::core::{JCal, JCalComponent};
use crate::rfc::jcal::error::JCalResult;

impl Converter {
    /// ## Summary
    /// Converts a component, its properties and sub-components to jCal.
    /// Order is preserved at every level.
    ///
    /// ## Errors
    /// Returns the first property conversion error.
    pub fn component_to_jcal(&mut self, component: &Component) -> JCalResult<JCalComponent> {
        tracing::trace!(component = %component.name, "Converting component to jCal");

        let properties = component
            .properties
            .iter()
            .map(|property| self.property_to_jcal(property))
            .collect::<JCalResult<Vec<_>>>()?;
        let components = component
            .children
            .iter()
            .map(|child| self.component_to_jcal(child))
            .collect::<JCalResult<Vec<_>>>()?;

        Ok(JCalComponent {
            name: component.name.to_ascii_lowercase(),
            properties,
            components,
        })
    }

    /// ## Summary
    /// Converts a jCal component back to a native component.
    ///
    /// ## Errors
    /// Returns the first property conversion error.
    pub fn component_from_jcal(&mut self, jcal: &JCalComponent) -> JCalResult<Component> {
        tracing::trace!(component = %jcal.name, "Converting component from jCal");

        let mut component = Component::custom(&jcal.name);
        for property in &jcal.properties {
            component.add_property(self.property_from_jcal(property)?);
        }
        for child in &jcal.components {
            component.add_child(self.component_from_jcal(child)?);
        }
        Ok(component)
    }

    /// Converts top-level components; a single component yields
    /// [`JCal::Single`].
    ///
    /// ## Errors
    /// Returns the first conversion error.
    pub fn to_jcal(&mut self, components: &[Component]) -> JCalResult<JCal> {
        let converted = components
            .iter()
            .map(|component| self.component_to_jcal(component))
            .collect::<JCalResult<Vec<_>>>()?;
        Ok(JCal::from_components(converted))
    }

    /// ## Errors
    /// Returns the first conversion error.
    pub fn from_jcal(&mut self, jcal: &JCal) -> JCalResult<Vec<Component>> {
        jcal.components()
            .iter()
            .map(|component| self.component_from_jcal(component))
            .collect()
    }
}
