//! Serialisable form of a scene.
//!
//! Field names are PascalCase on the wire, matching the property names the
//! components themselves use. Property maps keep their insertion order, so a
//! saved file lists properties the way the component declares them.

use std::collections::HashSet;
use std::rc::Rc;

use engine_component::ComponentRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::SceneError;
use crate::object::ObjectId;
use crate::scene::Scene;

/// A whole scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneDocument {
    #[serde(default)]
    pub animation_length: f64,
    #[serde(default)]
    pub objects: Vec<ObjectDocument>,
}

/// One object and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectDocument {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentDocument>,
    #[serde(default)]
    pub children: Vec<ObjectDocument>,
}

/// One component: its registered type name and its property values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComponentDocument {
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Scene {
    /// Capture the scene as a document.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Property`] if a property value cannot be
    /// encoded.
    pub fn to_document(&self) -> Result<SceneDocument, SceneError> {
        let objects = self
            .roots()
            .iter()
            .map(|&id| self.object_document(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SceneDocument {
            animation_length: self.animation_length(),
            objects,
        })
    }

    fn object_document(&self, id: ObjectId) -> Result<ObjectDocument, SceneError> {
        let object = self.object(id).ok_or(SceneError::ObjectNotFound(id))?;
        let components = object
            .components()
            .map(|attached| {
                Ok(ComponentDocument {
                    type_name: attached.type_name().to_string(),
                    properties: attached.component().properties().to_map()?,
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;
        let children = object
            .children()
            .iter()
            .map(|&child| self.object_document(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ObjectDocument {
            name: object.name().to_string(),
            components,
            children,
        })
    }

    /// Rebuild a scene from a document.
    ///
    /// Components are attached in dependency order regardless of the order
    /// they are listed in. Properties the document omits keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownComponentType`] for unregistered types,
    /// [`SceneError::DuplicateComponent`] when a type is listed twice on one
    /// object, [`SceneError::MissingDependency`] when a required type is
    /// absent, and [`SceneError::Property`] for malformed values.
    pub fn from_document(
        registry: Rc<ComponentRegistry>,
        document: &SceneDocument,
    ) -> Result<Self, SceneError> {
        let mut scene = Scene::new(registry);
        scene.set_animation_length(document.animation_length);
        for object in &document.objects {
            scene.load_object(object, None)?;
        }
        info!(
            objects = scene.len(),
            animation_length = document.animation_length,
            "loaded scene document"
        );
        Ok(scene)
    }

    fn load_object(
        &mut self,
        document: &ObjectDocument,
        parent: Option<ObjectId>,
    ) -> Result<ObjectId, SceneError> {
        let id = self.create_object(document.name.as_str(), parent)?;
        let registry = self.registry_handle();

        let mut pending = Vec::with_capacity(document.components.len());
        let mut listed = HashSet::new();
        for component in &document.components {
            let meta = registry
                .meta(&component.type_name)
                .ok_or_else(|| SceneError::UnknownComponentType(component.type_name.clone()))?;
            if !listed.insert(meta.type_name) {
                return Err(SceneError::DuplicateComponent {
                    object: id,
                    type_name: meta.type_name.to_string(),
                });
            }
            pending.push((meta, &component.properties));
        }

        while !pending.is_empty() {
            let object = self.object(id).ok_or(SceneError::ObjectNotFound(id))?;
            let Some(ready) = pending.iter().position(|(meta, _)| {
                meta.dependencies.iter().all(|dep| object.has_component(dep))
            }) else {
                let (meta, _) = pending[0];
                let missing = meta
                    .dependencies
                    .iter()
                    .find(|dep| !object.has_component(dep))
                    .copied()
                    .unwrap_or_default();
                return Err(SceneError::MissingDependency {
                    component: meta.type_name.to_string(),
                    dependency: missing.to_string(),
                });
            };
            let (meta, properties) = pending.remove(ready);
            let mut component = (meta.factory)();
            let accept_dynamic = component.accepts_dynamic_properties();
            component
                .properties_mut()
                .load_map(properties, accept_dynamic)?;
            self.check_attachable(id, meta)?;
            self.attach(id, meta.type_name, component);
        }

        debug!(object = %id, name = %document.name, "loaded object");
        for child in &document.children {
            self.load_object(child, Some(id))?;
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use engine_component::Component;
    use engine_math::Vec3;
    use serde_json::json;

    use super::*;
    use crate::components::{Plane, PointLight, Transform, builtin_registry};

    fn sample_document() -> SceneDocument {
        serde_json::from_value(json!({
            "AnimationLength": 4.0,
            "Objects": [{
                "Name": "lamp",
                "Components": [
                    { "Type": "PointLight", "Properties": { "Intensity": 2.5 } },
                    { "Type": "Transform", "Properties": {
                        "Position X": 1.0,
                        "Position Y": {
                            "Interpolation": "Linear",
                            "FrameTimes": [0.0, 4.0],
                            "FrameValues": [0.0, 8.0]
                        }
                    } }
                ],
                "Children": [{
                    "Name": "floor",
                    "Components": [
                        { "Type": "Transform" },
                        { "Type": "Plane", "Properties": { "Width": 6.0 } }
                    ]
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_load_orders_components_by_dependency() {
        let scene = Scene::from_document(builtin_registry(), &sample_document()).unwrap();
        let lamp = scene.find_by_name("lamp").unwrap();
        let floor = scene.find_by_name("floor").unwrap();

        let types: Vec<_> = scene
            .object(lamp)
            .unwrap()
            .components()
            .map(|c| c.type_name())
            .collect();
        assert_eq!(types, ["Transform", "PointLight"]);
        assert_eq!(scene.object(floor).unwrap().parent(), Some(lamp));
        assert_eq!(scene.animation_length(), 4.0);
        assert_eq!(scene.light_objects(), &[lamp]);

        let light = scene.component::<PointLight>(lamp).unwrap();
        assert_eq!(light.properties().double_value("Intensity"), 2.5);
        let plane = scene.component::<Plane>(floor).unwrap();
        assert_eq!(plane.properties().double_value("Width"), 6.0);
    }

    #[test]
    fn test_loaded_curves_follow_the_clock() {
        let mut scene = Scene::from_document(builtin_registry(), &sample_document()).unwrap();
        let lamp = scene.find_by_name("lamp").unwrap();
        scene.update(1.0);
        let position = scene.component::<Transform>(lamp).unwrap().position();
        assert!((position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_document_round_trip_preserves_scene() {
        let scene = Scene::from_document(builtin_registry(), &sample_document()).unwrap();
        let saved = scene.to_document().unwrap();
        let reloaded = Scene::from_document(builtin_registry(), &saved).unwrap();
        assert_eq!(reloaded.to_document().unwrap(), saved);

        let lamp = &saved.objects[0];
        assert_eq!(lamp.components[0].type_name, "Transform");
        let keys: Vec<_> = lamp.components[0].properties.keys().take(2).collect();
        assert_eq!(keys, ["Position X", "Position Y"]);
        assert!(lamp.components[0].properties["Position Y"].is_object());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let document = SceneDocument {
            animation_length: 0.0,
            objects: vec![ObjectDocument {
                name: "o".into(),
                components: vec![ComponentDocument {
                    type_name: "Teapot".into(),
                    properties: Map::new(),
                }],
                children: Vec::new(),
            }],
        };
        let err = Scene::from_document(builtin_registry(), &document).unwrap_err();
        assert!(matches!(err, SceneError::UnknownComponentType(name) if name == "Teapot"));
    }

    #[test]
    fn test_missing_dependency_is_rejected() {
        let document: SceneDocument = serde_json::from_value(json!({
            "Objects": [{ "Name": "o", "Components": [{ "Type": "Plane" }] }]
        }))
        .unwrap();
        let err = Scene::from_document(builtin_registry(), &document).unwrap_err();
        assert!(matches!(
            err,
            SceneError::MissingDependency { ref component, ref dependency }
                if component == "Plane" && dependency == "Transform"
        ));
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let document: SceneDocument = serde_json::from_value(json!({
            "Objects": [{ "Name": "o", "Components": [
                { "Type": "Transform" }, { "Type": "Transform" }
            ] }]
        }))
        .unwrap();
        assert!(matches!(
            Scene::from_document(builtin_registry(), &document),
            Err(SceneError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn test_custom_properties_accept_unknown_names() {
        let document: SceneDocument = serde_json::from_value(json!({
            "Objects": [{ "Name": "o", "Components": [
                { "Type": "CustomProperties", "Properties": { "Glow": 0.75 } },
                { "Type": "Transform", "Properties": { "Bogus": 1.0 } }
            ] }]
        }))
        .unwrap();
        let scene = Scene::from_document(builtin_registry(), &document).unwrap();
        let id = scene.find_by_name("o").unwrap();
        let object = scene.object(id).unwrap();
        let custom = object.component_by_name("CustomProperties").unwrap();
        assert_eq!(custom.properties().double_value("Glow"), 0.75);
        let transform = object.component_by_name("Transform").unwrap();
        assert!(!transform.properties().contains("Bogus"));
    }
}
