use crate::jvm::{BinaryName, Error, MethodDescriptor, Name, ParseDescriptor, UnqualifiedName};

/// Everything needed to patch one method
pub struct PatchRequest {
    /// Class whose method gets instrumented
    pub target_class: BinaryName,

    /// Method to instrument
    ///
    /// If the class has overloads of this name, the first one declared is used.
    pub target_method: UnqualifiedName,

    /// Class declaring the static method whose call marks the insertion point
    pub callee_owner: BinaryName,

    /// Name of the static method whose call marks the insertion point
    pub callee_name: UnqualifiedName,

    /// Signature of the static method, so that overloads are not confused
    pub callee_descriptor: MethodDescriptor,

    /// Source handed to the weaver
    pub snippet: SnippetTemplate,
}

impl PatchRequest {
    /// Build a request from source-level names (`com.example.Foo`) and a JVM method descriptor
    pub fn new(
        target_class: &str,
        target_method: &str,
        callee_owner: &str,
        callee_name: &str,
        callee_descriptor: &str,
        snippet: SnippetTemplate,
    ) -> Result<PatchRequest, Error> {
        fn make_name<N: Name>(name: &str) -> Result<N, Error> {
            N::from_string(String::from(name)).map_err(Error::BadName)
        }

        Ok(PatchRequest {
            target_class: BinaryName::from_dotted(target_class).map_err(Error::BadName)?,
            target_method: make_name(target_method)?,
            callee_owner: BinaryName::from_dotted(callee_owner).map_err(Error::BadName)?,
            callee_name: make_name(callee_name)?,
            callee_descriptor: MethodDescriptor::parse(callee_descriptor)
                .map_err(|err| Error::BadDescriptor(err.to_string()))?,
            snippet,
        })
    }

    /// Print skill roll details right after `Skill.checkAdvance` rolls its gaussian
    pub fn skill_gain_information() -> Result<PatchRequest, Error> {
        PatchRequest::new(
            "com.wurmonline.server.skills.Skill",
            "checkAdvance",
            "com.wurmonline.server.skills.Skill",
            "rollGaussian",
            "(FFJLjava/lang/String;)F",
            SnippetTemplate::new(
                "com.joedobo27.sgi.SkillGainInformationMod#printSkillInformation",
                &["$0", "$0.parent.id", "$3", "skill", "$1", "power"],
            ),
        )
    }

    pub fn with_target_method(mut self, target_method: &str) -> Result<PatchRequest, Error> {
        self.target_method =
            UnqualifiedName::from_string(String::from(target_method)).map_err(Error::BadName)?;
        Ok(self)
    }

    pub fn with_snippet(mut self, snippet: SnippetTemplate) -> PatchRequest {
        self.snippet = snippet;
        self
    }
}

/// Call statement inserted by the weaver
///
/// Arguments are passed through verbatim, so they can use whatever placeholders the weaver
/// understands (eg. `$0` for `this`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetTemplate {
    pub entry_point: String,
    pub arguments: Vec<String>,
}

impl SnippetTemplate {
    pub fn new(entry_point: impl Into<String>, arguments: &[&str]) -> SnippetTemplate {
        SnippetTemplate {
            entry_point: entry_point.into(),
            arguments: arguments.iter().map(|arg| String::from(*arg)).collect(),
        }
    }

    /// Render as `entry(arg1, arg2);`
    pub fn render(&self) -> String {
        format!("{}({});", self.entry_point, self.arguments.join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::RenderDescriptor;

    #[test]
    fn skill_gain_information_preset() {
        let request = PatchRequest::skill_gain_information().unwrap();
        assert_eq!(
            request.target_class.as_str(),
            "com/wurmonline/server/skills/Skill"
        );
        assert_eq!(request.target_method.as_str(), "checkAdvance");
        assert_eq!(request.callee_owner, request.target_class);
        assert_eq!(request.callee_name.as_str(), "rollGaussian");
        assert_eq!(
            request.callee_descriptor.render(),
            "(FFJLjava/lang/String;)F"
        );
        assert_eq!(
            request.snippet.render(),
            "com.joedobo27.sgi.SkillGainInformationMod#printSkillInformation(\
             $0, $0.parent.id, $3, skill, $1, power);"
        );
    }

    #[test]
    fn overrides() {
        let request = PatchRequest::skill_gain_information()
            .unwrap()
            .with_target_method("skillCheck")
            .unwrap()
            .with_snippet(SnippetTemplate::new("Hooks.after", &[]));
        assert_eq!(request.target_method.as_str(), "skillCheck");
        assert_eq!(request.snippet.render(), "Hooks.after();");

        assert!(PatchRequest::skill_gain_information()
            .unwrap()
            .with_target_method("bad.name")
            .is_err());
    }

    #[test]
    fn bad_requests() {
        let snippet = SnippetTemplate::new("Hooks.after", &[]);
        assert!(matches!(
            PatchRequest::new("a.B", "m", "a.B", "f", "(I", snippet.clone()),
            Err(Error::BadDescriptor(_))
        ));
        assert!(matches!(
            PatchRequest::new("a..B", "m", "a.B", "f", "()V", snippet),
            Err(Error::BadName(_))
        ));
    }
}
