use callsite_patch::jvm::class_file::{
    Attribute, BytecodeArray, ClassConstantIndex, ClassFile, Code, ConstantPool, LineNumber,
    LineNumberTable, Method, MethodRefConstantIndex, Utf8ConstantIndex, Version,
};
use callsite_patch::jvm::{BinaryName, ClassAccessFlags, MethodAccessFlags, Name};
use callsite_patch::patch::{
    locate_call_site, patch, CallSite, ClassPathDirectory, ClassRepository, InMemoryClasses,
    PatchOutcome, PatchRequest, RecordingWeaver, RepositoryError, SkipReason, WeaveError,
};
use std::fs;

/// Builder for a stand-in of `com.wurmonline.server.skills.Skill`
///
/// Like the real class, its constant pool has two `CONSTANT_Class` entries for `Skill`. Only the
/// second one is used by member references.
struct SkillClass {
    constants: ConstantPool,
    this_class: ClassConstantIndex,
    live_class: ClassConstantIndex,
    methods: Vec<Method>,
    code_name: Utf8ConstantIndex,
    lines_name: Utf8ConstantIndex,
    roll_gaussian: MethodRefConstantIndex,
    get_knowledge: MethodRefConstantIndex,
}

impl SkillClass {
    fn new() -> SkillClass {
        let mut constants = ConstantPool::new();
        let this_class = constants.push_class("com/wurmonline/server/skills/Skill");
        let live_class = constants.push_class("com/wurmonline/server/skills/Skill");
        let get_knowledge = constants.push_method_ref(live_class, "getKnowledge", "()D", false);
        constants.push_field_ref(live_class, "knowledge", "D");
        let roll_gaussian =
            constants.push_method_ref(live_class, "rollGaussian", "(FFJLjava/lang/String;)F", false);
        let code_name = constants.push_utf8("Code");
        let lines_name = constants.push_utf8("LineNumberTable");
        SkillClass {
            constants,
            this_class,
            live_class,
            methods: vec![],
            code_name,
            lines_name,
            roll_gaussian,
            get_knowledge,
        }
    }

    fn invoke(opcode: u8, method: MethodRefConstantIndex) -> Vec<u8> {
        let index = (method.0).0;
        vec![opcode, (index >> 8) as u8, index as u8]
    }

    fn roll_gaussian(&self) -> Vec<u8> {
        SkillClass::invoke(0xb8, self.roll_gaussian)
    }

    fn get_knowledge(&self) -> Vec<u8> {
        SkillClass::invoke(0xb6, self.get_knowledge)
    }

    fn add_method(&mut self, name: &str, code: Vec<u8>, lines: &[(u16, u16)]) -> &mut Self {
        let mut attributes = vec![];
        if !lines.is_empty() {
            let table = LineNumberTable(
                lines
                    .iter()
                    .map(|&(start_pc, line_number)| LineNumber {
                        start_pc,
                        line_number,
                    })
                    .collect(),
            );
            attributes.push(Attribute::encode(self.lines_name, &table).unwrap());
        }
        let code = Code {
            max_stack: 6,
            max_locals: 8,
            code_array: BytecodeArray(code),
            exception_table: vec![],
            attributes,
        };
        let code = Attribute::encode(self.code_name, &code).unwrap();
        self.push_method(name, MethodAccessFlags::PUBLIC, vec![code])
    }

    fn add_abstract_method(&mut self, name: &str) -> &mut Self {
        let flags = MethodAccessFlags::PUBLIC | MethodAccessFlags::ABSTRACT;
        self.push_method(name, flags, vec![])
    }

    fn push_method(
        &mut self,
        name: &str,
        access_flags: MethodAccessFlags,
        attributes: Vec<Attribute>,
    ) -> &mut Self {
        let name_index = self.constants.push_utf8(name);
        let descriptor_index = self.constants.push_utf8("(DDZ)D");
        self.methods.push(Method {
            access_flags: access_flags.into(),
            name_index,
            descriptor_index,
            attributes,
        });
        self
    }

    fn build(&mut self) -> ClassFile {
        let mut constants = self.constants.clone();
        let super_class = constants.push_class(BinaryName::OBJECT.as_str());
        ClassFile {
            version: Version::JAVA8,
            constants,
            access_flags: (ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER).into(),
            this_class: self.this_class,
            super_class: super_class.into(),
            interfaces: vec![],
            fields: vec![],
            methods: self.methods.clone(),
            attributes: vec![],
        }
    }

    /// `checkAdvance` rolls twice, on lines 101 and 103
    fn check_advance_code(&self) -> Vec<u8> {
        self.check_advance_code_rolling_through(self.roll_gaussian)
    }

    /// Same as [`SkillClass::check_advance_code`], with the second roll going through `last_roll`
    fn check_advance_code_rolling_through(&self, last_roll: MethodRefConstantIndex) -> Vec<u8> {
        let mut code = vec![0x2a]; // 0: aload_0
        code.extend(self.get_knowledge()); // 1: invokevirtual getKnowledge
        code.push(0x58); // 4: pop2
        code.extend([0x0b, 0x0b, 0x09, 0x01]); // 5: fconst_0 fconst_0 lconst_0 aconst_null
        code.extend(self.roll_gaussian()); // 9: invokestatic rollGaussian
        code.extend([0x38, 0x04]); // 12: fstore 4
        code.extend([0x0c, 0x0c, 0x09, 0x01]); // 14: fconst_1 fconst_1 lconst_0 aconst_null
        code.extend(SkillClass::invoke(0xb8, last_roll)); // 18: invokestatic rollGaussian
        code.extend([0x38, 0x05]); // 21: fstore 5
        code.push(0x0e); // 23: dconst_0
        code.push(0xaf); // 24: dreturn
        code
    }
}

const CHECK_ADVANCE_LINES: &[(u16, u16)] = &[(0, 100), (5, 101), (14, 103), (23, 104), (24, 106)];

fn skill_class() -> ClassFile {
    let mut skill = SkillClass::new();
    let check_advance = skill.check_advance_code();
    skill
        .add_method("checkAdvance", check_advance, CHECK_ADVANCE_LINES)
        .add_method("getKnowledge", vec![0x0e, 0xaf], &[(0, 50), (1, 51)])
        .build()
}

fn repository_with(class: &ClassFile) -> (InMemoryClasses, BinaryName) {
    let mut repository = InMemoryClasses::new();
    let name = repository.insert_class(class).unwrap();
    (repository, name)
}

#[test]
fn patch_after_last_roll() {
    let (repository, name) = repository_with(&skill_class());
    let mut weaver = RecordingWeaver::new();
    let request = PatchRequest::skill_gain_information().unwrap();

    let outcome = patch(&repository, &mut weaver, &request);
    assert!(matches!(outcome, PatchOutcome::Patched { line: 104 }));

    assert_eq!(weaver.insertions.len(), 1);
    let insertion = &weaver.insertions[0];
    assert_eq!(insertion.class, name);
    assert_eq!(insertion.method.as_str(), "checkAdvance");
    assert_eq!(insertion.line, 104);
    assert_eq!(
        insertion.snippet,
        "com.joedobo27.sgi.SkillGainInformationMod#printSkillInformation(\
         $0, $0.parent.id, $3, skill, $1, power);"
    );
}

#[test]
fn locate_without_weaving() {
    let class = skill_class();
    let request = PatchRequest::skill_gain_information().unwrap();
    assert_eq!(
        locate_call_site(&class, &request).unwrap(),
        CallSite {
            offset: 18,
            insertion_line: 104
        }
    );
}

#[test]
fn last_roll_through_a_duplicate_reference() {
    let mut skill = SkillClass::new();
    let duplicate = skill.constants.push_method_ref(
        skill.live_class,
        "rollGaussian",
        "(FFJLjava/lang/String;)F",
        false,
    );
    let check_advance = skill.check_advance_code_rolling_through(duplicate);
    let class = skill
        .add_method("checkAdvance", check_advance, CHECK_ADVANCE_LINES)
        .build();
    let request = PatchRequest::skill_gain_information().unwrap();
    assert_eq!(
        locate_call_site(&class, &request).unwrap(),
        CallSite {
            offset: 18,
            insertion_line: 104
        }
    );
}

#[test]
fn method_without_the_call_is_untouched() {
    let (repository, name) = repository_with(&skill_class());
    let before = repository.bytes(&name).unwrap().to_vec();
    let mut weaver = RecordingWeaver::new();
    let request = PatchRequest::skill_gain_information()
        .unwrap()
        .with_target_method("getKnowledge")
        .unwrap();

    let outcome = patch(&repository, &mut weaver, &request);
    assert!(matches!(
        outcome,
        PatchOutcome::Skipped(SkipReason::InstructionNotFound)
    ));
    assert!(weaver.insertions.is_empty());
    assert_eq!(repository.bytes(&name).unwrap(), &before[..]);
    assert_eq!(repository.load(&name).unwrap(), skill_class());
}

#[test]
fn call_on_the_last_line() {
    let mut skill = SkillClass::new();
    let mut code = vec![0x0b, 0x0b, 0x09, 0x01];
    code.extend(skill.roll_gaussian());
    code.extend([0x57, 0xb1]); // pop, return
    let class = skill
        .add_method("checkAdvance", code, &[(0, 10), (4, 11)])
        .build();

    let request = PatchRequest::skill_gain_information().unwrap();
    assert!(matches!(
        locate_call_site(&class, &request),
        Err(SkipReason::LineMapExhausted { line: 11 })
    ));
}

#[test]
fn switch_before_the_call() {
    let mut skill = SkillClass::new();
    let mut code = vec![
        0x1a, // iload_0
        0xab, 0x00, 0x00, // lookupswitch (padding)
        0x00, 0x00, 0x00, 0x0b, // default
        0x00, 0x00, 0x00, 0x00, // npairs
    ];
    code.extend([0x0b, 0x0b, 0x09, 0x01]);
    code.extend(skill.roll_gaussian());
    code.extend([0x57, 0xb1]);
    let class = skill
        .add_method("checkAdvance", code, &[(0, 10), (12, 11), (19, 12)])
        .build();

    let (repository, _) = repository_with(&class);
    let mut weaver = RecordingWeaver::new();
    let outcome = patch(
        &repository,
        &mut weaver,
        &PatchRequest::skill_gain_information().unwrap(),
    );
    assert!(matches!(
        outcome,
        PatchOutcome::Skipped(SkipReason::UnsupportedOpcodeWidth {
            opcode: 0xab,
            offset: 1
        })
    ));
    assert!(weaver.insertions.is_empty());
}

#[test]
fn unusable_methods() {
    let mut skill = SkillClass::new();
    let rolls = skill.check_advance_code();
    let class = skill
        .add_abstract_method("checkAdvance")
        .add_method("skillCheck", rolls, &[])
        .build();

    let request = PatchRequest::skill_gain_information().unwrap();
    assert!(matches!(
        locate_call_site(&class, &request),
        Err(SkipReason::MissingCode)
    ));

    let request = request.with_target_method("skillCheck").unwrap();
    assert!(matches!(
        locate_call_site(&class, &request),
        Err(SkipReason::MissingLineNumbers)
    ));

    let request = request.with_target_method("setKnowledge").unwrap();
    assert!(matches!(
        locate_call_site(&class, &request),
        Err(SkipReason::MethodNotFound(name)) if name.as_str() == "setKnowledge"
    ));
}

#[test]
fn callee_missing_from_the_pool() {
    let mut constants = ConstantPool::new();
    let this_class = constants.push_class("com/wurmonline/server/skills/Skill");
    let mut skill = SkillClass::new();
    skill.constants = constants;
    skill.this_class = this_class;
    skill.code_name = skill.constants.push_utf8("Code");
    skill.lines_name = skill.constants.push_utf8("LineNumberTable");
    let class = skill
        .add_method("checkAdvance", vec![0x0e, 0xaf], &[(0, 1), (1, 2)])
        .build();

    // The only `Skill` entry is the class itself, which no member reference points at
    let request = PatchRequest::skill_gain_information().unwrap();
    assert!(matches!(
        locate_call_site(&class, &request),
        Err(SkipReason::SymbolNotFound(_))
    ));

    // Owner is fine, but `rollGaussian(FF)F` is never referenced
    let class = skill_class();
    let request = PatchRequest::new(
        "com.wurmonline.server.skills.Skill",
        "checkAdvance",
        "com.wurmonline.server.skills.Skill",
        "rollGaussian",
        "(FF)F",
        request.snippet.clone(),
    )
    .unwrap();
    match locate_call_site(&class, &request) {
        Err(SkipReason::SymbolNotFound(detail)) => assert!(detail.contains("rollGaussian(FF)F")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn weaver_refuses() {
    let (repository, _) = repository_with(&skill_class());
    let mut weaver = RecordingWeaver::rejecting("no such class SkillGainInformationMod");
    let outcome = patch(
        &repository,
        &mut weaver,
        &PatchRequest::skill_gain_information().unwrap(),
    );
    match outcome {
        PatchOutcome::Skipped(SkipReason::WeaveRejected(WeaveError::Rejected(msg))) => {
            assert_eq!(msg, "no such class SkillGainInformationMod")
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn missing_class() {
    let repository = InMemoryClasses::new();
    let outcome = patch(
        &repository,
        &mut RecordingWeaver::new(),
        &PatchRequest::skill_gain_information().unwrap(),
    );
    assert!(matches!(
        outcome,
        PatchOutcome::Skipped(SkipReason::ClassUnavailable(RepositoryError::NotFound(_)))
    ));
}

#[test]
fn load_from_class_path_directory() {
    let root = std::env::temp_dir().join(format!("callsite-patch-test-{}", std::process::id()));
    let class = skill_class();
    let request = PatchRequest::skill_gain_information().unwrap();

    let repository = ClassPathDirectory::new(&root);
    let path = repository.path_of(&request.target_class);
    assert!(path.ends_with("com/wurmonline/server/skills/Skill.class"));
    assert!(matches!(
        repository.load(&request.target_class),
        Err(RepositoryError::NotFound(_))
    ));

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, class.to_bytes().unwrap()).unwrap();
    let mut weaver = RecordingWeaver::new();
    let outcome = patch(&repository, &mut weaver, &request);
    fs::remove_dir_all(&root).unwrap();

    assert!(matches!(outcome, PatchOutcome::Patched { line: 104 }));
}
