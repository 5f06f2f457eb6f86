use crate::element::Element;
use crate::r5::Extension;

/// FHIR primitive type for markdown-formatted text
/// 
/// A string that may contain Github Flavored Markdown syntax for optional processing by a mark down presentation engine
/// 
/// See: [markdown](http://hl7.org/fhir/StructureDefinition/markdown)
pub type Markdown = Element<String, Extension>;
