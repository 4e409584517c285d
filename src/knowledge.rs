//! Static TRIZ knowledge: the 40 invention principles, the contradiction
//! matrix, and the keyword tables behind parameter detection and problem
//! classification.
//!
//! Everything here is fixed reference data, built once per engine.
//! Principles carry bilingual text resolved at presentation time;
//! keywords stay unlocalized and are matched as raw substrings in
//! whatever script the problem text uses.

use crate::types::{Language, LocalizedText, Principle, PrincipleCategory, ProblemCategory};

/// One contradiction matrix row: an ordered (improving, worsening)
/// parameter pair and the principles historically tied to it. Rows are
/// directional; a reversed pair is a separate row when it exists at all.
#[derive(Debug, Clone)]
pub struct MatrixEntry {
    pub improving: String,
    pub worsening: String,
    pub principle_ids: Vec<u8>,
}

impl MatrixEntry {
    pub fn new(improving: &str, worsening: &str, principle_ids: &[u8]) -> Self {
        Self {
            improving: improving.to_string(),
            worsening: worsening.to_string(),
            principle_ids: principle_ids.to_vec(),
        }
    }
}

/// Keyword set for one technical parameter. Table order is significant:
/// detection reports parameters in this order, not in text order.
#[derive(Debug, Clone)]
pub struct ParameterKeywords {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ParameterKeywords {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Keyword set for one problem category. First matching row wins.
#[derive(Debug, Clone)]
pub struct CategoryKeywords {
    pub category: ProblemCategory,
    pub keywords: Vec<String>,
}

impl CategoryKeywords {
    pub fn new(category: ProblemCategory, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The complete read-only knowledge base an engine works against.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    principles: Vec<Principle>,
    matrix: Vec<MatrixEntry>,
    parameters: Vec<ParameterKeywords>,
    categories: Vec<CategoryKeywords>,
}

impl KnowledgeBase {
    /// The full built-in tables: all 40 principles, the extended
    /// contradiction matrix, and both keyword tables.
    pub fn builtin() -> Self {
        Self {
            principles: builtin_principles(),
            matrix: builtin_matrix(),
            parameters: builtin_parameter_keywords(),
            categories: builtin_category_keywords(),
        }
    }

    /// Assemble a knowledge base from explicit tables. Partial tables
    /// are allowed: matrix rows may reference principle ids that are
    /// not populated, and lookups simply skip them.
    pub fn new(
        principles: Vec<Principle>,
        matrix: Vec<MatrixEntry>,
        parameters: Vec<ParameterKeywords>,
        categories: Vec<CategoryKeywords>,
    ) -> Self {
        Self {
            principles,
            matrix,
            parameters,
            categories,
        }
    }

    pub fn principle(&self, id: u8) -> Option<&Principle> {
        self.principles.iter().find(|p| p.id == id)
    }

    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    /// Exact-orientation matrix lookup. Callers wanting the reversed
    /// pair as a fallback ask for it explicitly.
    pub fn matrix_lookup(&self, improving: &str, worsening: &str) -> Option<&[u8]> {
        self.matrix
            .iter()
            .find(|entry| entry.improving == improving && entry.worsening == worsening)
            .map(|entry| entry.principle_ids.as_slice())
    }

    pub fn matrix(&self) -> &[MatrixEntry] {
        &self.matrix
    }

    pub fn parameters(&self) -> &[ParameterKeywords] {
        &self.parameters
    }

    pub fn categories(&self) -> &[CategoryKeywords] {
        &self.categories
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Fallback principle list per problem category, used when the matrix
/// has no row for the resolved parameter pair. The General list doubles
/// as the global fallback and is never empty.
pub fn category_default_principles(category: ProblemCategory) -> &'static [u8] {
    match category {
        ProblemCategory::Technical => &[1, 2, 15, 35, 40],
        ProblemCategory::Design => &[1, 3, 15, 27, 35],
        ProblemCategory::Cost => &[27, 35, 1, 2, 40],
        ProblemCategory::User => &[6, 15, 25, 27, 35],
        ProblemCategory::Quality => &[1, 2, 15, 35, 40],
        ProblemCategory::General => &[1, 2, 15, 27, 35],
    }
}

/// Normalize a user-supplied parameter to its canonical lower-case
/// English name. Native-script display names map onto the canonical
/// set; anything unrecognized passes through lower-cased, so unknown
/// pairs still reach the matrix fallback chain unchanged.
pub fn canonical_parameter(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "重量" => "weight".to_string(),
        "强度" => "strength".to_string(),
        "速度" => "speed".to_string(),
        "精度" => "precision".to_string(),
        "成本" => "cost".to_string(),
        "质量" => "quality".to_string(),
        "复杂性" => "complexity".to_string(),
        "体积" => "volume".to_string(),
        "安全" => "safety".to_string(),
        "效率" => "efficiency".to_string(),
        "易用性" => "usability".to_string(),
        "功能性" => "functionality".to_string(),
        "可靠性" => "reliability".to_string(),
        "能耗" => "energy".to_string(),
        "功能" => "function".to_string(),
        "便利" => "convenience".to_string(),
        "自动化" => "automation".to_string(),
        "智能化" => "intelligence".to_string(),
        "灵活性" => "flexibility".to_string(),
        "稳定性" => "stability".to_string(),
        other => other.to_lowercase(),
    }
}

/// Display form of a canonical parameter name for the given language.
/// Unrecognized names render as-is in both languages.
pub fn parameter_display(param: &str, lang: Language) -> String {
    if lang == Language::En {
        return param.to_string();
    }
    match param {
        "weight" => "重量".to_string(),
        "strength" => "强度".to_string(),
        "speed" => "速度".to_string(),
        "precision" => "精度".to_string(),
        "cost" => "成本".to_string(),
        "quality" => "质量".to_string(),
        "complexity" => "复杂性".to_string(),
        "volume" => "体积".to_string(),
        "safety" => "安全".to_string(),
        "efficiency" => "效率".to_string(),
        "usability" => "易用性".to_string(),
        "functionality" => "功能性".to_string(),
        "reliability" => "可靠性".to_string(),
        "energy" => "能耗".to_string(),
        "function" => "功能".to_string(),
        "convenience" => "便利".to_string(),
        "automation" => "自动化".to_string(),
        "intelligence" => "智能化".to_string(),
        "flexibility" => "灵活性".to_string(),
        "stability" => "稳定性".to_string(),
        other => other.to_string(),
    }
}

fn principle(
    id: u8,
    name: (&str, &str),
    description: (&str, &str),
    detailed: (&str, &str),
    examples: &[(&str, &str)],
    category: PrincipleCategory,
    keywords: &[&str],
) -> Principle {
    Principle {
        id,
        name: LocalizedText::new(name.0, name.1),
        description: LocalizedText::new(description.0, description.1),
        detailed_explanation: LocalizedText::new(detailed.0, detailed.1),
        examples: examples
            .iter()
            .map(|(zh, en)| LocalizedText::new(zh, en))
            .collect(),
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn builtin_principles() -> Vec<Principle> {
    use PrincipleCategory::*;
    vec![
        principle(
            1,
            ("分割", "Segmentation"),
            ("将对象分成独立的部分", "Divide an object into independent parts"),
            (
                "将物体分解为独立的部分，使各部分易于拆卸和组装，增加分解的程度",
                "Break the object into independent parts, make each part easy to disassemble and reassemble, and increase the degree of segmentation",
            ),
            &[
                ("模块化设计", "Modular design"),
                ("可拆卸家具", "Detachable furniture"),
                ("组件化软件架构", "Component-based software architecture"),
                ("微服务架构", "Microservice architecture"),
            ],
            Structure,
            &["模块", "组件", "分离", "独立", "拆分", "module", "component", "split", "independent"],
        ),
        principle(
            2,
            ("抽取", "Extraction"),
            ("从对象中取出干扰的部分或特性", "Remove the interfering part or property from an object"),
            (
                "分离出有害或不必要的部分/特性，或相反，单独分离出有用的部分/特性",
                "Separate out the harmful or unnecessary part or property, or conversely isolate the single useful one",
            ),
            &[
                ("噪音消除", "Noise cancellation"),
                ("杂质过滤", "Impurity filtering"),
                ("核心功能提取", "Core feature extraction"),
                ("异常处理隔离", "Isolated error handling"),
            ],
            Function,
            &["提取", "分离", "净化", "隔离", "筛选", "extract", "isolate", "filter", "remove"],
        ),
        principle(
            3,
            ("局部质量", "Local quality"),
            ("使对象的不同部分具有不同功能", "Give different parts of an object different functions"),
            (
                "从均匀结构转变为非均匀结构，使对象或系统的各个部分具有各自最适合的功能",
                "Move from a uniform structure to a non-uniform one so each part of the object or system performs the function it suits best",
            ),
            &[
                ("人体工学设计", "Ergonomic design"),
                ("差异化服务", "Differentiated service tiers"),
                ("定制化功能", "Customized features"),
                ("局部优化", "Local optimization"),
            ],
            Structure,
            &["差异", "定制", "局部", "专用", "适配", "local", "custom", "dedicated", "tailored"],
        ),
        principle(
            4,
            ("不对称", "Asymmetry"),
            ("用不对称形式代替对称形式", "Replace a symmetrical form with an asymmetrical one"),
            (
                "如果对象已经是不对称的，增加其不对称的程度，以获得新的功能或消除缺陷",
                "If the object is already asymmetrical, increase the degree of asymmetry to gain new functions or remove defects",
            ),
            &[
                ("防呆接口设计", "Foolproof connector design"),
                ("单向阀门", "One-way valves"),
                ("差异化布局", "Uneven layouts"),
                ("非对称加密", "Asymmetric encryption"),
            ],
            Structure,
            &["不对称", "单向", "防呆", "偏置", "差别", "asymmetry", "one-way", "uneven", "offset"],
        ),
        principle(
            5,
            ("合并", "Merging"),
            ("将相同或相邻的对象合并在一起", "Bring identical or adjacent objects together"),
            (
                "在空间上合并相同或相关的对象与操作，或在时间上合并相邻的操作，使其并行进行",
                "Merge identical or related objects and operations in space, or bring adjacent operations together in time so they run in parallel",
            ),
            &[
                ("批量处理", "Batch processing"),
                ("多核处理器", "Multi-core processors"),
                ("功能集成", "Feature integration"),
                ("合并请求", "Request coalescing"),
            ],
            Function,
            &["合并", "集成", "批量", "并行", "聚合", "merge", "combine", "batch", "integrate"],
        ),
        principle(
            6,
            ("通用性", "Universality"),
            ("使对象能够执行多种功能", "Make an object perform multiple functions"),
            (
                "使对象能执行多种功能，从而不需要其他对象",
                "Let one object perform several functions so that other objects become unnecessary",
            ),
            &[
                ("多功能工具", "Multi-purpose tools"),
                ("通用接口", "Universal interfaces"),
                ("平台化设计", "Platform-based design"),
                ("标准化组件", "Standardized components"),
            ],
            Function,
            &["通用", "多功能", "万能", "标准", "兼容", "universal", "multi-purpose", "standard", "compatible"],
        ),
        principle(
            7,
            ("嵌套", "Nesting"),
            ("将一个对象放置在另一个对象内部", "Place one object inside another"),
            (
                "将对象依次放入另一个对象内部，或使一个部分穿过另一个部分的空腔",
                "Put each object inside the next in turn, or pass one part through a cavity of another",
            ),
            &[
                ("俄罗斯套娃", "Nested dolls"),
                ("伸缩天线", "Telescopic antennas"),
                ("嵌套容器", "Nested containers"),
                ("内嵌函数", "Inlined functions"),
            ],
            Structure,
            &["嵌套", "内置", "套装", "收纳", "伸缩", "nest", "embed", "telescope", "contain"],
        ),
        principle(
            8,
            ("重量补偿", "Counterweight"),
            ("通过与其他对象结合来补偿对象的重量", "Compensate the weight of an object by joining it with others"),
            (
                "将对象与提供升力的对象结合，或利用环境的气动力和流体动力来补偿重量",
                "Join the object with one that provides lift, or use aerodynamic and hydrodynamic forces from the environment to offset its weight",
            ),
            &[
                ("气球吊装", "Balloon lifting"),
                ("水翼船", "Hydrofoils"),
                ("配重平衡", "Counterbalancing"),
                ("负载均衡", "Load balancing"),
            ],
            Structure,
            &["补偿", "平衡", "抵消", "减重", "升力", "weight", "balance", "offset", "lift"],
        ),
        principle(
            9,
            ("预先反作用", "Prior counteraction"),
            ("预先施加反作用来消除不利影响", "Apply a counteraction in advance to cancel a harmful effect"),
            (
                "如果操作同时包含有害和有用的作用，预先施加反作用以控制有害影响",
                "When an action has both harmful and useful effects, precede it with counteractions that keep the harm under control",
            ),
            &[
                ("预应力混凝土", "Pre-stressed concrete"),
                ("疫苗接种", "Vaccination"),
                ("回滚预案", "Rollback plans"),
                ("压力测试", "Stress testing"),
            ],
            Process,
            &["反作用", "预防", "预案", "对冲", "抗压", "counteract", "precaution", "preempt", "hedge"],
        ),
        principle(
            10,
            ("预先作用", "Prior action"),
            ("预先完成全部或部分必要的动作", "Perform the required action fully or partly in advance"),
            (
                "在需要之前预先完成对象的全部或部分变化，并将对象预先安置在最方便的位置",
                "Carry out all or part of the required change before it is needed, and stage objects where they can act without delay",
            ),
            &[
                ("预编译", "Ahead-of-time compilation"),
                ("缓存预热", "Cache warming"),
                ("预加载资源", "Resource preloading"),
                ("预制构件", "Prefabricated parts"),
            ],
            Process,
            &["预先", "提前", "预置", "预热", "准备", "preload", "prepare", "prefetch", "advance"],
        ),
        principle(
            11,
            ("预先防范", "Cushion in advance"),
            ("预先准备好应急措施来补偿可靠性不足", "Prepare emergency means in advance to offset low reliability"),
            (
                "为对象预先准备好应急和补偿手段，在故障发生时减小损失",
                "Give the object standby and compensating means beforehand so that a failure causes the least possible damage",
            ),
            &[
                ("安全气囊", "Airbags"),
                ("数据备份", "Data backups"),
                ("降级方案", "Graceful degradation"),
                ("保险机制", "Failsafe mechanisms"),
            ],
            Process,
            &["防范", "应急", "备份", "冗余", "保险", "backup", "failsafe", "redundancy", "safety"],
        ),
        principle(
            12,
            ("等势", "Equipotentiality"),
            ("改变工作条件避免升降对象", "Change working conditions so the object need not be raised or lowered"),
            (
                "改变作业条件，使对象在同一势能水平上工作，消除不必要的升降和搬运",
                "Rework the operating conditions so work stays at one potential level and unnecessary lifting and carrying disappear",
            ),
            &[
                ("平层装卸", "Level loading docks"),
                ("运河船闸", "Canal locks"),
                ("统一接口层", "Uniform interface layers"),
                ("扁平化组织", "Flat organizations"),
            ],
            Process,
            &["等势", "水平", "扁平", "平层", "同级", "level", "flat", "uniform", "even"],
        ),
        principle(
            13,
            ("反向作用", "Inversion"),
            ("用相反的动作代替规定的动作", "Use the opposite action instead of the prescribed one"),
            (
                "颠倒过程或对象，使可动部分固定、固定部分可动，或将对象倒置",
                "Invert the process or object, fix the moving part and move the fixed part, or turn the object upside down",
            ),
            &[
                ("倒排索引", "Inverted indexes"),
                ("反向代理", "Reverse proxies"),
                ("逆向思维", "Reverse thinking"),
                ("控制反转", "Inversion of control"),
            ],
            Function,
            &["反向", "颠倒", "逆向", "倒置", "反转", "invert", "reverse", "opposite", "flip"],
        ),
        principle(
            14,
            ("曲面化", "Spheroidality"),
            ("用曲线或曲面代替直线或平面", "Replace straight lines and flat surfaces with curves"),
            (
                "从直线和平面过渡到曲线和曲面，利用滚动和旋转运动代替直线运动",
                "Move from straight lines and planes to curves and spheres, and use rolling or rotation instead of straight motion",
            ),
            &[
                ("流线型外壳", "Streamlined housings"),
                ("滚珠轴承", "Ball bearings"),
                ("圆角界面", "Rounded interface corners"),
                ("环形缓冲区", "Ring buffers"),
            ],
            Structure,
            &["曲面", "圆形", "滚动", "旋转", "弧形", "curve", "round", "rolling", "sphere"],
        ),
        principle(
            15,
            ("动态性", "Dynamics"),
            (
                "使对象或系统能够自动适应工作的最佳状态",
                "Let the object or system adapt itself to the optimal working state",
            ),
            (
                "对象的特性应改变，以便在工作的每个阶段都是最佳的；将对象分成能够相互移动的部分",
                "Let the object's characteristics change so they stay optimal at every working stage; divide the object into parts that can move relative to each other",
            ),
            &[
                ("自适应系统", "Adaptive systems"),
                ("动态调整", "Dynamic tuning"),
                ("智能响应", "Smart responses"),
                ("弹性伸缩", "Elastic scaling"),
            ],
            Adaptability,
            &["动态", "自适应", "调整", "变化", "响应", "dynamic", "adaptive", "elastic", "responsive"],
        ),
        principle(
            16,
            ("不足或过度作用", "Partial or excessive action"),
            (
                "无法完全达到目标时，稍微超出或稍微不足",
                "If the exact effect is unreachable, use slightly more or slightly less",
            ),
            (
                "如果难以百分之百实现预期效果，用略微超过或略微不足的方式简化问题",
                "When achieving exactly one hundred percent of the effect is hard, simplify the problem by overshooting or undershooting a little",
            ),
            &[
                ("过量喷涂再回收", "Overspray and recover"),
                ("近似算法", "Approximation algorithms"),
                ("限流降载", "Rate limiting"),
                ("粗调细调", "Coarse and fine tuning"),
            ],
            Process,
            &["过度", "不足", "近似", "裕度", "略微", "approximate", "overshoot", "partial", "margin"],
        ),
        principle(
            17,
            ("空间维数变化", "Another dimension"),
            ("利用多维空间代替单维运动", "Move into an additional dimension"),
            (
                "将对象的运动或布置从一维扩展到二维或三维，利用多层结构和对象的另一面",
                "Extend motion or arrangement from one dimension to two or three, use multi-storey layouts and the reverse side of the object",
            ),
            &[
                ("立体停车场", "Multi-storey parking"),
                ("双面电路板", "Double-sided circuit boards"),
                ("三维建模", "3D modeling"),
                ("多级流水线", "Multi-stage pipelines"),
            ],
            Structure,
            &["多维", "立体", "分层", "堆叠", "空间", "dimension", "layer", "stack", "vertical"],
        ),
        principle(
            18,
            ("机械振动", "Mechanical vibration"),
            ("使对象振动或提高其振动频率", "Set the object into oscillation or raise its frequency"),
            (
                "利用振动和共振，提高振动频率直至超声波，用压电振动代替机械振动",
                "Use oscillation and resonance, raise the frequency up to ultrasonic, and replace mechanical vibration with piezoelectric vibration",
            ),
            &[
                ("超声波清洗", "Ultrasonic cleaning"),
                ("振动筛分", "Vibratory sieving"),
                ("振动反馈", "Haptic feedback"),
                ("时钟脉冲", "Clock pulses"),
            ],
            Process,
            &["振动", "共振", "频率", "脉冲", "超声", "vibration", "resonance", "frequency", "pulse"],
        ),
        principle(
            19,
            ("周期性作用", "Periodic action"),
            ("用周期性动作代替连续动作", "Replace continuous action with periodic pulses"),
            (
                "用周期性或脉冲式的动作代替连续动作，并利用脉冲之间的间歇执行其他动作",
                "Use periodic or pulsed actions instead of continuous ones, and use the pauses between pulses for other work",
            ),
            &[
                ("心跳检测", "Heartbeat checks"),
                ("定时任务", "Scheduled jobs"),
                ("脉冲焊接", "Pulse welding"),
                ("轮询采样", "Polling intervals"),
            ],
            Process,
            &["周期", "间歇", "定时", "轮询", "节拍", "periodic", "interval", "pulse", "schedule"],
        ),
        principle(
            20,
            ("有效作用的连续性", "Continuity of useful action"),
            (
                "使对象的所有部分满负荷连续工作",
                "Keep every part of the object working at full load without pauses",
            ),
            (
                "连续不间断地执行有用的作用，消除空转和中间停顿",
                "Carry on the useful action without interruption and remove idle runs and intermediate stops",
            ),
            &[
                ("流水线生产", "Assembly lines"),
                ("持续集成", "Continuous integration"),
                ("流式处理", "Stream processing"),
                ("满载运行", "Full-load operation"),
            ],
            Process,
            &["连续", "不间断", "持续", "满载", "流水", "continuous", "streaming", "nonstop", "pipeline"],
        ),
        principle(
            21,
            ("减少有害作用的时间", "Skipping"),
            ("高速执行有害或危险的操作", "Run harmful or hazardous operations at high speed"),
            (
                "以最高速度完成有害的或危险的工序，缩短有害作用的暴露时间",
                "Push a harmful or dangerous step through at the highest possible speed so exposure to the harm stays short",
            ),
            &[
                ("快速灼烧消毒", "Flash sterilization"),
                ("高速热切割", "High-speed thermal cutting"),
                ("快速故障切换", "Fast failover"),
                ("瞬时开关", "Momentary switching"),
            ],
            Process,
            &["瞬间", "跳过", "缩短", "高速", "一次性", "rapid", "instant", "skip", "shorten"],
        ),
        principle(
            22,
            ("变害为利", "Blessing in disguise"),
            ("利用有害因素获得有益效果", "Turn harmful factors into benefits"),
            (
                "利用有害因素获得有益的效果，或将有害因素与另一有害因素叠加使其消除",
                "Use harmful factors to achieve a positive effect, or add a second harmful factor so the two cancel out",
            ),
            &[
                ("余热回收", "Waste heat recovery"),
                ("减毒疫苗", "Attenuated vaccines"),
                ("错误驱动学习", "Learning from failure"),
                ("垃圾发电", "Waste-to-energy plants"),
            ],
            Function,
            &["变害为利", "回收", "转化", "废物", "利用", "recycle", "reuse", "convert", "waste"],
        ),
        principle(
            23,
            ("反馈", "Feedback"),
            ("引入反馈来改进过程或动作", "Introduce feedback to improve a process or action"),
            (
                "引入反馈回路改善过程，如果反馈已存在，改变其大小或灵敏度",
                "Introduce a feedback loop to improve the process; if feedback already exists, change its magnitude or sensitivity",
            ),
            &[
                ("恒温控制", "Thermostatic control"),
                ("用户反馈循环", "User feedback loops"),
                ("闭环调节", "Closed-loop regulation"),
                ("监控告警", "Monitoring alerts"),
            ],
            Automation,
            &["反馈", "回路", "调节", "监控", "闭环", "feedback", "loop", "control", "monitor"],
        ),
        principle(
            24,
            ("借助中介物", "Intermediary"),
            ("使用中介物传递或执行动作", "Use an intermediary to carry or transfer the action"),
            (
                "使用中介物传递作用或执行中间动作，中介物可在完成后轻易移除",
                "Use an intermediate carrier to transfer or run the action, one that can be removed easily when done",
            ),
            &[
                ("消息队列", "Message queues"),
                ("中介者模式", "Mediator pattern"),
                ("协议适配器", "Protocol adapters"),
                ("中间商平台", "Brokerage platforms"),
            ],
            Function,
            &["中介", "中间", "代理", "转接", "桥接", "intermediary", "proxy", "adapter", "broker"],
        ),
        principle(
            25,
            ("自服务", "Self-service"),
            ("对象应该自己为自己服务", "Make the object serve itself"),
            (
                "使对象自己为自己服务，执行辅助和维修操作",
                "Let the object serve itself and carry out auxiliary and repair operations",
            ),
            &[
                ("自动化", "Automation"),
                ("自修复", "Self-healing"),
                ("自适应", "Self-adaptation"),
                ("自主管理", "Autonomous management"),
            ],
            Automation,
            &["自动", "自主", "自服务", "自修复", "自适应", "automatic", "autonomous", "self-service", "self-healing"],
        ),
        principle(
            26,
            ("复制", "Copying"),
            (
                "用简单廉价的复制品代替复杂昂贵的对象",
                "Use simple cheap copies instead of complex expensive objects",
            ),
            (
                "用简化的廉价复制品代替难以获得的、复杂的、昂贵的或易损的对象",
                "Replace an unavailable, complex, expensive or fragile object with its simplified and inexpensive copies",
            ),
            &[
                ("仿真模拟", "Simulation models"),
                ("数字孪生", "Digital twins"),
                ("测试替身", "Test doubles"),
                ("沙盘演练", "Sandbox rehearsals"),
            ],
            Cost,
            &["复制", "仿真", "模拟", "镜像", "副本", "copy", "replica", "simulate", "mirror"],
        ),
        principle(
            27,
            ("廉价替代", "Cheap replacement"),
            ("用便宜的对象代替昂贵的对象", "Replace an expensive object with a cheap one"),
            (
                "用便宜的对象来代替昂贵的，在某些特性（如使用寿命）上有所损失",
                "Replace the expensive object with cheap ones, conceding some qualities such as service life",
            ),
            &[
                ("开源替代", "Open-source alternatives"),
                ("低成本方案", "Low-cost solutions"),
                ("简化版本", "Simplified editions"),
                ("经济型设计", "Economy designs"),
            ],
            Cost,
            &["廉价", "替代", "经济", "低成本", "简化", "cheap", "replace", "economical", "low-cost"],
        ),
        principle(
            28,
            ("机械系统替代", "Mechanics substitution"),
            ("用感官场系统代替机械系统", "Replace a mechanical system with a sensory field system"),
            (
                "用光学、声学、电磁等场系统代替机械系统，实现非接触的作用",
                "Replace the mechanical system with optical, acoustic or electromagnetic fields that act without contact",
            ),
            &[
                ("感应开关", "Proximity switches"),
                ("语音控制", "Voice control"),
                ("无线充电", "Wireless charging"),
                ("光学传感", "Optical sensing"),
            ],
            Automation,
            &["感应", "无线", "非接触", "传感", "场", "sensor", "wireless", "contactless", "field"],
        ),
        principle(
            29,
            ("气动与液压", "Pneumatics and hydraulics"),
            ("用气体或液体部件代替固体部件", "Use gas and liquid parts instead of solid ones"),
            (
                "用气态或液态的部分代替固体部分，利用气垫、液压和气压实现柔性支撑",
                "Replace solid parts with gaseous or liquid ones and use air cushions, hydraulics and pneumatics for flexible support",
            ),
            &[
                ("气垫运输", "Air cushion transport"),
                ("液压制动", "Hydraulic brakes"),
                ("充气结构", "Inflatable structures"),
                ("流量缓冲", "Flow buffering"),
            ],
            Adaptability,
            &["气动", "液压", "流体", "气垫", "缓冲", "pneumatic", "hydraulic", "fluid", "cushion"],
        ),
        principle(
            30,
            ("柔性壳体与薄膜", "Flexible shells and thin films"),
            (
                "用柔性壳体和薄膜代替刚性结构",
                "Use flexible shells and thin films instead of rigid structures",
            ),
            (
                "使用柔性壳体和薄膜代替三维刚性结构，用薄膜将对象与环境隔离",
                "Use flexible shells and thin films instead of bulky rigid structures, and isolate the object from its environment with films",
            ),
            &[
                ("保鲜膜包装", "Cling film packaging"),
                ("柔性屏幕", "Flexible displays"),
                ("防水涂层", "Waterproof coatings"),
                ("轻量封装", "Lightweight enclosures"),
            ],
            Adaptability,
            &["柔性", "薄膜", "软壳", "涂层", "包覆", "flexible", "film", "membrane", "coating"],
        ),
        principle(
            31,
            ("多孔材料", "Porous materials"),
            ("使对象多孔或加入多孔元素", "Make the object porous or add porous elements"),
            (
                "使对象成为多孔的或使用多孔附加物，利用孔隙容纳有用的物质或功能",
                "Make the object porous or add porous elements, and use the pores to hold a useful substance or function",
            ),
            &[
                ("海绵结构", "Sponge structures"),
                ("透气面料", "Breathable fabrics"),
                ("蜂窝板材", "Honeycomb panels"),
                ("稀疏存储", "Sparse storage"),
            ],
            Material,
            &["多孔", "透气", "渗透", "蜂窝", "疏松", "porous", "breathable", "sparse", "honeycomb"],
        ),
        principle(
            32,
            ("颜色改变", "Color changes"),
            (
                "改变对象或环境的颜色和透明度",
                "Change the color or transparency of the object or its surroundings",
            ),
            (
                "改变对象或其环境的颜色与透明度，利用颜色变化传递信息或改善观察",
                "Change the color or transparency of the object or environment, and use color changes to carry information or improve observation",
            ),
            &[
                ("变色试纸", "Indicator strips"),
                ("状态指示灯", "Status lights"),
                ("语法高亮", "Syntax highlighting"),
                ("透明外壳", "Transparent casings"),
            ],
            State,
            &["颜色", "透明", "变色", "标识", "显示", "color", "transparent", "highlight", "indicator"],
        ),
        principle(
            33,
            ("均质性", "Homogeneity"),
            ("相互作用的对象应使用相同材料", "Make interacting objects from the same material"),
            (
                "与主对象相互作用的对象应当由相同或性质相近的材料制成",
                "Objects that interact with the main object should be made of the same material or one with matching properties",
            ),
            &[
                ("同质焊接", "Same-metal welding"),
                ("统一技术栈", "Uniform tech stacks"),
                ("同源数据格式", "Consistent data formats"),
                ("配套材料", "Matched materials"),
            ],
            Material,
            &["均质", "同质", "一致", "统一", "相同", "homogeneous", "uniform", "consistent", "same"],
        ),
        principle(
            34,
            ("抛弃与再生", "Discarding and recovering"),
            (
                "抛弃已完成功能的部分或在工作中再生",
                "Discard spent parts or restore them during operation",
            ),
            (
                "已完成功能的部分应被抛弃或在工作过程中直接恢复，消耗掉的部分应及时再生",
                "Throw away or dissolve parts that have done their job, and restore consumed parts directly during operation",
            ),
            &[
                ("可降解材料", "Biodegradable materials"),
                ("火箭分级", "Rocket staging"),
                ("垃圾回收", "Garbage collection"),
                ("连接池回收", "Connection pool recycling"),
            ],
            Cost,
            &["抛弃", "再生", "回收", "降解", "释放", "discard", "regenerate", "recycle", "release"],
        ),
        principle(
            35,
            ("参数改变", "Parameter changes"),
            ("改变对象的物理或化学状态", "Change the physical or chemical state of an object"),
            (
                "改变对象的物理或化学状态；改变浓度或稠度；改变柔性的程度；改变温度",
                "Change the object's physical or chemical state, its concentration or consistency, its degree of flexibility, or its temperature",
            ),
            &[
                ("状态转换", "State transitions"),
                ("参数调整", "Parameter tuning"),
                ("相变利用", "Phase change usage"),
                ("属性修改", "Attribute modification"),
            ],
            State,
            &["状态", "参数", "转换", "调整", "修改", "state", "parameter", "transform", "adjust"],
        ),
        principle(
            36,
            ("相变", "Phase transitions"),
            ("利用物质相变过程中发生的现象", "Use phenomena that occur during phase transitions"),
            (
                "利用相变过程中发生的现象，如体积改变和热量的吸收或释放",
                "Use the effects of phase transitions such as volume change and the absorption or release of heat",
            ),
            &[
                ("热管散热", "Heat pipes"),
                ("相变储能", "Phase-change energy storage"),
                ("冷热循环", "Freeze-thaw cycling"),
                ("状态机迁移", "State machine transitions"),
            ],
            State,
            &["相变", "蒸发", "凝固", "熔化", "转变", "phase", "transition", "melt", "evaporate"],
        ),
        principle(
            37,
            ("热膨胀", "Thermal expansion"),
            ("利用材料的热膨胀或收缩", "Use the thermal expansion or contraction of materials"),
            (
                "利用材料的热胀冷缩，或组合使用具有不同热膨胀系数的多种材料",
                "Use the expansion and contraction of materials with heat, or combine materials with different expansion coefficients",
            ),
            &[
                ("双金属片", "Bimetallic strips"),
                ("热装配合", "Shrink fitting"),
                ("温控开关", "Thermal switches"),
                ("伸缩缝", "Expansion joints"),
            ],
            State,
            &["膨胀", "收缩", "温度", "热胀", "热缩", "thermal", "expansion", "contraction", "temperature"],
        ),
        principle(
            38,
            ("强氧化剂", "Strong oxidants"),
            (
                "用富氧或强氧化环境代替普通环境",
                "Replace ordinary air with enriched or oxidizing atmospheres",
            ),
            (
                "用富氧空气或纯氧代替普通空气，利用电离氧和臭氧强化反应",
                "Replace common air with oxygen-enriched air or pure oxygen, and intensify reactions with ionized oxygen or ozone",
            ),
            &[
                ("富氧燃烧", "Oxygen-enriched combustion"),
                ("臭氧消毒", "Ozone disinfection"),
                ("高压氧舱", "Hyperbaric chambers"),
                ("强化测试环境", "Intensified test environments"),
            ],
            Material,
            &["氧化", "富氧", "强化", "臭氧", "活化", "oxidize", "enrich", "intensify", "accelerate"],
        ),
        principle(
            39,
            ("惰性环境", "Inert atmosphere"),
            ("用惰性环境代替普通环境", "Replace the normal environment with an inert one"),
            (
                "用惰性环境代替普通环境，在真空中或惰性气体中完成过程",
                "Replace the normal environment with an inert one and run the process in a vacuum or under inert gas",
            ),
            &[
                ("氮气保鲜", "Nitrogen preservation"),
                ("惰性气体焊接", "Inert gas welding"),
                ("隔离运行环境", "Isolated runtimes"),
                ("只读副本", "Read-only replicas"),
            ],
            Material,
            &["惰性", "保护", "真空", "氮气", "封存", "inert", "isolate", "vacuum", "protect"],
        ),
        principle(
            40,
            ("复合材料", "Composite materials"),
            ("用复合材料代替均质材料", "Replace homogeneous materials with composites"),
            ("从均质材料转向复合材料", "Move from homogeneous materials to composite ones"),
            &[
                ("复合材料", "Composite materials"),
                ("多层结构", "Multi-layer structures"),
                ("混合系统", "Hybrid systems"),
                ("组合方案", "Combined approaches"),
            ],
            Material,
            &["复合", "多层", "混合", "组合", "复杂", "composite", "hybrid", "layered", "combined"],
        ),
    ]
}

fn builtin_matrix() -> Vec<MatrixEntry> {
    vec![
        MatrixEntry::new("weight", "strength", &[1, 8, 15, 40]),
        MatrixEntry::new("weight", "speed", &[2, 14, 15, 35]),
        MatrixEntry::new("strength", "weight", &[1, 8, 36, 40]),
        MatrixEntry::new("complexity", "reliability", &[1, 26, 27, 40]),
        MatrixEntry::new("precision", "speed", &[10, 18, 32, 39]),
        MatrixEntry::new("cost", "quality", &[13, 26, 27, 35]),
        MatrixEntry::new("energy", "efficiency", &[2, 6, 19, 36]),
        MatrixEntry::new("volume", "function", &[7, 17, 29, 40]),
        MatrixEntry::new("speed", "precision", &[10, 18, 32, 39]),
        MatrixEntry::new("safety", "convenience", &[11, 24, 25, 35]),
        MatrixEntry::new("automation", "cost", &[25, 26, 27, 35]),
        MatrixEntry::new("intelligence", "reliability", &[15, 23, 25, 35]),
        MatrixEntry::new("usability", "functionality", &[6, 15, 27, 32]),
        MatrixEntry::new("flexibility", "stability", &[15, 32, 35, 40]),
    ]
}

fn builtin_parameter_keywords() -> Vec<ParameterKeywords> {
    vec![
        ParameterKeywords::new(
            "weight",
            &["重", "轻", "质量", "重量", "载重", "heavy", "light", "mass", "weight", "load"],
        ),
        ParameterKeywords::new(
            "strength",
            &["强度", "硬度", "刚性", "坚固", "耐用", "strength", "hardness", "rigid", "sturdy", "durable"],
        ),
        ParameterKeywords::new(
            "speed",
            &["快", "慢", "速度", "效率", "响应", "fast", "slow", "speed", "efficiency", "response"],
        ),
        ParameterKeywords::new(
            "precision",
            &["精确", "准确", "精度", "误差", "偏差", "precise", "accura", "precision", "error", "deviation"],
        ),
        ParameterKeywords::new(
            "cost",
            &["价格", "费用", "成本", "便宜", "昂贵", "price", "fee", "cost", "cheap", "expensive"],
        ),
        ParameterKeywords::new(
            "quality",
            &["质量", "品质", "优质", "可靠", "稳定", "quality", "premium", "reliab", "stable", "robust"],
        ),
        ParameterKeywords::new(
            "complexity",
            &["复杂", "简单", "复杂度", "难度", "繁琐", "complex", "simple", "complexity", "difficult", "cumbersome"],
        ),
        ParameterKeywords::new(
            "volume",
            &["大小", "体积", "尺寸", "占地", "空间", "size", "volume", "dimension", "footprint", "space"],
        ),
        ParameterKeywords::new(
            "safety",
            &["安全", "危险", "风险", "保护", "防护", "safety", "danger", "risk", "protect", "secure"],
        ),
        ParameterKeywords::new(
            "efficiency",
            &["效率", "性能", "生产率", "吞吐量", "产能", "efficiency", "performance", "productivity", "throughput", "capacity"],
        ),
        ParameterKeywords::new(
            "usability",
            &["易用", "简单", "直观", "友好", "便捷", "usab", "simple", "intuitive", "friendly", "convenient"],
        ),
        ParameterKeywords::new(
            "functionality",
            &["功能", "特性", "能力", "用途", "作用", "function", "feature", "capability", "usage", "purpose"],
        ),
    ]
}

fn builtin_category_keywords() -> Vec<CategoryKeywords> {
    vec![
        CategoryKeywords::new(
            ProblemCategory::Technical,
            &["技术", "系统", "设备", "机器", "算法", "软件", "technical", "system", "equipment", "machine", "algorithm", "software"],
        ),
        CategoryKeywords::new(
            ProblemCategory::Design,
            &["设计", "外观", "结构", "布局", "界面", "造型", "design", "appearance", "structure", "layout", "interface", "styling"],
        ),
        CategoryKeywords::new(
            ProblemCategory::Cost,
            &["成本", "价格", "费用", "预算", "经济", "投资", "cost", "price", "expense", "budget", "economy", "investment"],
        ),
        CategoryKeywords::new(
            ProblemCategory::User,
            &["用户", "客户", "体验", "需求", "满意", "使用", "user", "customer", "experience", "demand", "satisf", "usage"],
        ),
        CategoryKeywords::new(
            ProblemCategory::Quality,
            &["质量", "缺陷", "故障", "错误", "问题", "不良", "quality", "defect", "failure", "error", "problem", "flaw"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_forty_principles_present_with_unique_ids() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.principles().len(), 40);
        let mut seen = std::collections::HashSet::new();
        for p in kb.principles() {
            assert!((1..=40).contains(&p.id), "id {} out of range", p.id);
            assert!(seen.insert(p.id), "duplicate id {}", p.id);
        }
    }

    #[test]
    fn every_principle_is_fully_populated() {
        let kb = KnowledgeBase::builtin();
        for p in kb.principles() {
            assert!(!p.name.zh.is_empty() && !p.name.en.is_empty(), "principle {}", p.id);
            assert!(!p.description.zh.is_empty() && !p.description.en.is_empty());
            assert!(!p.detailed_explanation.zh.is_empty());
            assert!(!p.examples.is_empty(), "principle {} has no examples", p.id);
            assert!(p.keywords.len() >= 3, "principle {} keyword set too small", p.id);
        }
    }

    #[test]
    fn matrix_rows_reference_known_principles() {
        let kb = KnowledgeBase::builtin();
        for entry in kb.matrix() {
            assert!(!entry.principle_ids.is_empty());
            for id in &entry.principle_ids {
                assert!(
                    kb.principle(*id).is_some(),
                    "matrix ({}, {}) references missing principle {}",
                    entry.improving,
                    entry.worsening,
                    id
                );
            }
        }
    }

    #[test]
    fn matrix_lookup_is_orientation_sensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.matrix_lookup("weight", "strength"), Some(&[1, 8, 15, 40][..]));
        assert_eq!(kb.matrix_lookup("strength", "weight"), Some(&[1, 8, 36, 40][..]));
        // (weight, speed) exists only in one direction
        assert!(kb.matrix_lookup("weight", "speed").is_some());
        assert!(kb.matrix_lookup("speed", "weight").is_none());
    }

    #[test]
    fn category_defaults_reference_known_principles() {
        let kb = KnowledgeBase::builtin();
        for category in [
            ProblemCategory::Technical,
            ProblemCategory::Design,
            ProblemCategory::Cost,
            ProblemCategory::User,
            ProblemCategory::Quality,
            ProblemCategory::General,
        ] {
            let defaults = category_default_principles(category);
            assert!(!defaults.is_empty());
            for id in defaults {
                assert!(kb.principle(*id).is_some());
            }
        }
    }

    #[test]
    fn canonical_parameter_normalizes_chinese_names() {
        assert_eq!(canonical_parameter("重量"), "weight");
        assert_eq!(canonical_parameter("强度"), "strength");
        assert_eq!(canonical_parameter("复杂性"), "complexity");
        assert_eq!(canonical_parameter("Weight"), "weight");
        // Unknown names pass through lower-cased
        assert_eq!(canonical_parameter("Maintainability"), "maintainability");
        assert_eq!(canonical_parameter("可维护性"), "可维护性");
    }

    #[test]
    fn parameter_display_round_trips_known_names() {
        assert_eq!(parameter_display("weight", Language::Zh), "重量");
        assert_eq!(parameter_display("weight", Language::En), "weight");
        assert_eq!(parameter_display("可维护性", Language::Zh), "可维护性");
    }

    #[test]
    fn detection_table_keeps_the_fixed_parameter_order() {
        let kb = KnowledgeBase::builtin();
        let names: Vec<&str> = kb.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "weight",
                "strength",
                "speed",
                "precision",
                "cost",
                "quality",
                "complexity",
                "volume",
                "safety",
                "efficiency",
                "usability",
                "functionality"
            ]
        );
    }
}
