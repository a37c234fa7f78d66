//! Starter catalog of curated protocols.

use physio_core::{Modality, ProtocolRecord};

struct SeedEntry {
    disease_name: &'static str,
    keywords: &'static str,
    description: &'static str,
    estim: [&'static str; 4],
    ultrasound: [&'static str; 3],
    exercises: &'static str,
    treatment_duration: &'static str,
    expected_recovery: &'static str,
    reference: &'static str,
    illustration: &'static str,
}

impl SeedEntry {
    fn to_record(&self) -> ProtocolRecord {
        let [kind, parameters, placement, purpose] = self.estim;
        let [us_kind, us_parameters, us_purpose] = self.ultrasound;
        ProtocolRecord {
            id: None,
            disease_name: self.disease_name.to_string(),
            keywords: self.keywords.to_string(),
            description: self.description.to_string(),
            electrotherapy: Modality {
                kind: kind.to_string(),
                parameters: parameters.to_string(),
                placement: Some(placement.to_string()),
                purpose: purpose.to_string(),
            },
            ultrasound: Modality {
                kind: us_kind.to_string(),
                parameters: us_parameters.to_string(),
                placement: None,
                purpose: us_purpose.to_string(),
            },
            exercises: self.exercises.to_string(),
            treatment_duration: Some(self.treatment_duration.to_string()),
            expected_recovery: Some(self.expected_recovery.to_string()),
            reference: self.reference.to_string(),
            illustration: Some(self.illustration.to_string()),
        }
    }
}

const CATALOG: &[SeedEntry] = &[
    SeedEntry {
        disease_name: "Adhesive Capsulitis (Frozen Shoulder)",
        keywords: "stiffness, shoulder pain, capsulitis, الكتف المتجمد",
        description: "A painful disorder where the shoulder capsule becomes inflamed and stiff.",
        estim: [
            "TENS (High Rate)",
            "Freq: 100-150 Hz. Width: 50-80 µs. Time: 20 mins.",
            "Bracket Method: 2 electrodes anterior/posterior to the joint.",
            "Pain modulation via Gate Control Theory.",
        ],
        ultrasound: [
            "Indicated (Continuous)",
            "1 MHz (deep), 1.5 W/cm², 100%.",
            "Deep heating for extensibility.",
        ],
        exercises: "1. Pendulum Exercises.\n2. Wall Climb.\n3. Wand Exercises.",
        treatment_duration: "Session: 45-60 mins.",
        expected_recovery: "Recovery: 3-12 months.",
        reference: "JOSPT Guidelines",
        illustration: "/static/shoulder.jpg",
    },
    SeedEntry {
        disease_name: "Lumbar Disc Herniation (Sciatica)",
        keywords: "back pain, sciatica, disc, ديسك, عرق النسا",
        description: "Disc material displacement compressing the nerve root.",
        estim: [
            "IFC (Interferential)",
            "Carrier: 4000Hz. Beat: 80-150Hz. Vector: On.",
            "Paravertebral: Two channels crossing at the level of pain (L4-S1).",
            "Deep pain relief and muscle relaxation.",
        ],
        ultrasound: [
            "Not for Disc",
            "Avoid direct spinal application.",
            "Muscle spasm relief only.",
        ],
        exercises: "1. McKenzie Extension.\n2. Nerve Flossing.\n3. Core Stability.",
        treatment_duration: "Session: 45 mins.",
        expected_recovery: "Recovery: 3-6 months.",
        reference: "NASS Guidelines",
        illustration: "/static/back.jpg",
    },
    SeedEntry {
        disease_name: "Knee Osteoarthritis",
        keywords: "knee pain, oa, stiffness, خشونة الركبة",
        description: "Degenerative wear-and-tear arthritis of the knee.",
        estim: [
            "NMES (Strengthening)",
            "Target: Quads. Freq: 50Hz. Duty: 10/50. Intensity: Motor.",
            "One electrode on VMO motor point, one on proximal Femoral Nerve trunk.",
            "Strengthening Quadriceps to offload joint.",
        ],
        ultrasound: [
            "Indicated",
            "Pulsed 20% or Continuous. 1 MHz.",
            "Pain relief.",
        ],
        exercises: "1. Quad Sets.\n2. SLR.\n3. Mini Squats.",
        treatment_duration: "Lifelong management.",
        expected_recovery: "Pain reduction in 4-8 weeks.",
        reference: "OARSI Guidelines",
        illustration: "/static/knee.jpg",
    },
    SeedEntry {
        disease_name: "Total Knee Arthroplasty (Post-Op TKA)",
        keywords: "knee replacement, tka, surgery, joint replacement, تغيير مفصل الركبة",
        description: "Rehabilitation following surgical replacement of the knee joint due to severe OA.",
        estim: [
            "NMES (Neuromuscular Electrical Stimulation)",
            "Target: Quadriceps. Freq: 50Hz. Intensity: Max tolerated. Time: 15-20 mins.",
            "One electrode on VMO motor point, one on proximal Femoral Nerve trunk.",
            "Crucial for reversing quadriceps inhibition (AMI) immediately post-op.",
        ],
        ultrasound: [
            "Generally Not Indicated",
            "Avoid heat/US over metal implants directly. Cryotherapy is preferred.",
            "Use Cryotherapy (Ice) for swelling control.",
        ],
        exercises: "Phase 1 (0-2 wks): Ankle pumps, Quad sets, Heel slides (ROM 0-90).\nPhase 2 (3-6 wks): Mini squats, Gait training, Stationary bike.\nPhase 3: Functional training.",
        treatment_duration: "3-4 months supervised PT.",
        expected_recovery: "Return to normal low-impact activities in 3-6 months.",
        reference: "Ranawat et al. Consensus Guidelines",
        illustration: "/static/tka.jpg",
    },
    SeedEntry {
        disease_name: "Total Hip Arthroplasty (Post-Op THA)",
        keywords: "hip replacement, tha, hip surgery, تغيير مفصل الفخذ",
        description: "Rehabilitation after hip joint replacement. *Precautions depend on surgical approach.*",
        estim: [
            "TENS (for incisional pain)",
            "Freq: 100Hz. Intensity: Sensory. Continuous.",
            "Electrodes placed parallel to the incision line (at least 2cm away). Do not place directly over staples.",
            "Pain management to facilitate early mobilization.",
        ],
        ultrasound: [
            "Contraindicated over Plastic/Metal",
            "Do not use Ultrasound over the prosthesis (risk of heating/loosening).",
            "N/A",
        ],
        exercises: "1. Ankle Pumps.\n2. Glute Squeeze.\n3. Heel Slides (within limit).\n4. Abduction (Avoid crossing midline).\n*Adhere to dislocation precautions.*",
        treatment_duration: "2-3 months.",
        expected_recovery: "Full weight bearing usually immediate (cemented) or 6 weeks (uncemented).",
        reference: "HSS Rehabilitation Guidelines",
        illustration: "/static/tha.jpg",
    },
    SeedEntry {
        disease_name: "Rotator Cuff Repair (Post-Op)",
        keywords: "shoulder surgery, supraspinatus tear, cuff repair, قطع وتر الكتف",
        description: "Rehab following surgical reattachment of torn rotator cuff tendons.",
        estim: [
            "TENS (Post-op Pain)",
            "Freq: 100Hz. Mode: Continuous. Time: As needed.",
            "Two channels crossing the shoulder joint (Anterior/Posterior and Lateral).",
            "Pain control during passive motion phase.",
        ],
        ultrasound: [
            "Not indicated in early phase",
            "Can weaken suture repair in first 6 weeks. Avoid.",
            "N/A",
        ],
        exercises: "Phase 1 (0-6 wks): PROM only (Pendulums, Pulleys). NO Active motion.\nPhase 2 (6-12 wks): AAROM -> AROM.\nPhase 3 (12+ wks): Strengthening.",
        treatment_duration: "4-6 months.",
        expected_recovery: "Full return to sport/heavy labor: 6-9 months.",
        reference: "ASES Rehabilitation Protocol",
        illustration: "/static/rotator.jpg",
    },
    SeedEntry {
        disease_name: "Mechanical Neck Pain",
        keywords: "neck pain, cervical, stiffness, trapezius spasm, شد عضلات الرقبة",
        description: "Generalized neck pain provoked by sustained postures or movement.",
        estim: [
            "TENS (Burst Mode)",
            "Freq: 2-4 Hz (Burst). Pulse: 200 µs. Intensity: Visible twitch. Time: 20 mins.",
            "Paravertebral (Cervical paraspinals) and Upper Trapezius.",
            "Endorphin release for chronic neck pain and muscle relaxation.",
        ],
        ultrasound: [
            "Indicated (Thermal)",
            "Frequency: 1 MHz (Trapezius) or 3 MHz (Cervical). Continuous. 1.0 W/cm².",
            "Increase blood flow and relax tight suboccipital/paraspinal muscles.",
        ],
        exercises: "1. Chin Tucks (Deep Neck Flexor activation).\n2. Upper Trapezius Stretch.\n3. Levator Scapulae Stretch.\n4. Scapular Retraction exercises.",
        treatment_duration: "Session: 45 mins. Freq: 2-3/week.",
        expected_recovery: "Improvement usually seen within 2-4 weeks.",
        reference: "APTA Orthopaedic Section Guidelines",
        illustration: "/static/neck.jpg",
    },
    SeedEntry {
        disease_name: "ACL Reconstruction Rehab",
        keywords: "acl, knee ligament, surgery, sports injury, الرباط الصليبي",
        description: "Post-operative management of Anterior Cruciate Ligament reconstruction.",
        estim: [
            "NMES (Russian Current)",
            "Target: Quads (VMO). 2500Hz burst. 10/50 duty cycle. Intensity: Motor.",
            "Bipolar placement: VMO motor point and Proximal Rectus Femoris.",
            "Restore quad strength and prevent atrophy (Essential in first 6 weeks).",
        ],
        ultrasound: [
            "Not primary modality",
            "Cryotherapy is superior for post-op swelling.",
            "N/A",
        ],
        exercises: "Wk 1-2: Full extension emphasis, Patellar mobs, SLR.\nWk 3-6: Closed chain (Squats, Lunges), Proprioception.\nMonth 3+: Running drills.",
        treatment_duration: "6-9 months.",
        expected_recovery: "Return to sport: 9-12 months (Must pass Hop Tests).",
        reference: "Moon et al. / Delaware Protocol",
        illustration: "/static/acl.jpg",
    },
    SeedEntry {
        disease_name: "Hamstring Muscle Strain",
        keywords: "pulled muscle, thigh pain, sprinter injury, posterior thigh, مزق العضلة الخلفية",
        description: "Tear of muscle fibers in the posterior thigh.",
        estim: [
            "Pulsed Shortwave or IFC",
            "IFC: 4000Hz, Vector scan for pain.",
            "Quadripolar (4 electrodes) surrounding the site of pain/strain on posterior thigh.",
            "Pain relief and hematoma absorption (sub-acute).",
        ],
        ultrasound: [
            "Indicated (Pulsed initially)",
            "Acute: Pulsed 20%, 1MHz. Chronic: Continuous 1MHz, 1.5 W/cm².",
            "Promote collagen alignment during healing.",
        ],
        exercises: "Phase 1: Isometric Hamstring sets, Ice.\nPhase 2: Eccentric loading (Nordic Hamstring Curl).\nPhase 3: Sprinting mechanics.",
        treatment_duration: "4-8 weeks.",
        expected_recovery: "High recurrence rate if eccentric strengthening is neglected.",
        reference: "Aspetar Hamstring Protocol",
        illustration: "/static/hamstring.jpg",
    },
    SeedEntry {
        disease_name: "Meniscus Tear (Conservative/Post-Op)",
        keywords: "knee locking, clicking, cartilage tear, ghoda, غضروف الركبة",
        description: "Injury to the shock-absorbing cartilage in the knee.",
        estim: [
            "NMES / TENS",
            "NMES for Quad strength. TENS for joint line pain.",
            "NMES: On Quads. TENS: Medial and Lateral joint line.",
            "Muscle support to offload the compartment.",
        ],
        ultrasound: [
            "Indicated (Pulsed)",
            "Low intensity pulsed ultrasound (LIPUS) may aid healing in vascular zones.",
            "Symptom management.",
        ],
        exercises: "1. Range of Motion (Bike).\n2. Open chain quads (avoid deep flexion initially).\n3. Balance/Proprioception.",
        treatment_duration: "Conservative: 6-8 weeks. Repair: 4-6 months.",
        expected_recovery: "Surgery indicated if locking/catching persists.",
        reference: "JOSPT Guidelines",
        illustration: "/static/meniscus.jpg",
    },
    SeedEntry {
        disease_name: "Lateral Ankle Sprain",
        keywords: "ankle pain, sprain, swelling, ligament tear, twist, التواء الكاحل",
        description: "Injury to the lateral ligaments (ATFL, CFL) usually caused by inversion trauma.",
        estim: [
            "HVPC / IFC",
            "Freq: 120 Hz. Polarity: Negative (for edema). Time: 20-30 mins.",
            "Surrounding the malleolus (Medial and Lateral) ensuring the current passes through the edema.",
            "Edema reduction (curbing swelling) in the acute phase.",
        ],
        ultrasound: [
            "Indicated (Pulsed only in Acute)",
            "Acute: 20% Duty Cycle, 3 MHz, 0.5 W/cm². Chronic: 100%, 1 MHz.",
            "Acute: Accelerate healing. Chronic: Break down adhesions/scar tissue.",
        ],
        exercises: "1. RICE Protocol (Acute).\n2. Ankle Pumps (Range of Motion).\n3. Towel Scrunches (Intrinsics).\n4. Single Leg Balance (Proprioception).",
        treatment_duration: "Mild: 2 weeks. Severe: 6-12 weeks.",
        expected_recovery: "Return to sport depends on passing functional hop tests.",
        reference: "NATA Position Statement on Ankle Sprains",
        illustration: "/static/ankle.jpg",
    },
    SeedEntry {
        disease_name: "Lateral Epicondylitis (Tennis Elbow)",
        keywords: "elbow pain, tennis elbow, grip weakness, forearm pain, التهاب الكوع",
        description: "Overuse injury involving the extensor carpi radialis brevis (ECRB) tendon.",
        estim: [
            "TENS (Conventional)",
            "Freq: 100 Hz. Pulse: 100 µs. Time: 15 mins.",
            "One electrode over the pain site (Lateral Epicondyle), one proximal over the muscle belly.",
            "Pain management to facilitate exercise performance.",
        ],
        ultrasound: [
            "Indicated (Pulsed Mode)",
            "Frequency: 3 MHz. Intensity: 0.5-1.0 W/cm². Duty Cycle: 20% (Non-thermal). Time: 5 mins.",
            "Stimulate collagen synthesis and tendon healing.",
        ],
        exercises: "1. Eccentric Wrist Extension (Tyler Twist).\n2. Wrist Extensor Stretch.\n3. Grip Strengthening.",
        treatment_duration: "Session: 30-45 mins. Freq: 2/week.",
        expected_recovery: "Recovery typically takes 12 weeks to 6 months.",
        reference: "Bisset et al. (Physiotherapy Evidence Database)",
        illustration: "/static/elbow.jpg",
    },
    SeedEntry {
        disease_name: "Stroke Rehabilitation (Hemiplegia)",
        keywords: "cva, stroke, paralysis, weakness, gait, hemiparesis, الجلطة الدماغية",
        description: "Rehabilitation for loss of motor function/sensation after cerebral infarction.",
        estim: [
            "FES (Functional Electrical Stimulation)",
            "Target: Tibialis Anterior (for Foot Drop).",
            "Active electrode on Tibialis Anterior motor point (below knee, lateral), Reference on tendon.",
            "Neuroplasticity and functional motor re-learning (Gait).",
        ],
        ultrasound: [
            "Not typically indicated",
            "Focus is on neuro-facilitation techniques.",
            "N/A",
        ],
        exercises: "1. Task-Oriented Training (Reach to grasp).\n2. Sit-to-Stand practice.\n3. Gait Training.\n4. Constraint-Induced Movement Therapy (CIMT).",
        treatment_duration: "Long term (Months to Years).",
        expected_recovery: "Fastest recovery in first 3-6 months.",
        reference: "AHA/ASA Stroke Rehab Guidelines",
        illustration: "/static/stroke.jpg",
    },
    SeedEntry {
        disease_name: "Parkinson's Disease",
        keywords: "tremor, rigidity, shuffling gait, balance, pd, الشلل الرعاش",
        description: "Progressive neurodegenerative disorder affecting movement control.",
        estim: [
            "Biofeedback / Cueing",
            "Auditory (Metronome) or Visual cues.",
            "N/A (Cues are auditory/visual, not electrode based).",
            "Overcome freezing of gait (FOG).",
        ],
        ultrasound: [
            "N/A",
            "Not indicated.",
            "N/A",
        ],
        exercises: "1. LSVT BIG (Large amplitude movements).\n2. Rotational trunk exercises.\n3. Balance & Fall Prevention.\n4. Treadmill training.",
        treatment_duration: "Lifelong maintenance.",
        expected_recovery: "Goal is to delay decline and maintain independence.",
        reference: "European Physiotherapy Guideline",
        illustration: "/static/parkinson.jpg",
    },
    SeedEntry {
        disease_name: "Bell's Palsy (Facial Palsy)",
        keywords: "facial paralysis, face droop, bell, weakness, شلل الوجه",
        description: "Unilateral weakness or paralysis of facial muscles due to inflammation of the 7th cranial nerve.",
        estim: [
            "Electrical Muscle Stimulation (EMS)",
            "Target: Individual facial muscles. Pulse: Long duration (for denervated) or standard EMS.",
            "Motor Point Stimulation: Specific placement on the belly of affected muscles.",
            "Maintain muscle bulk/prevent atrophy. *Biofeedback is preferred.*",
        ],
        ultrasound: [
            "Not standard practice",
            "Not typically used for facial muscles due to proximity to eyes.",
            "N/A",
        ],
        exercises: "1. AAROM (Assisted Active ROM) for eyebrows, eyes, lips.\n2. Mime Therapy.\n3. Kabat Rehabilitation.\n4. Blowing/Whistling exercises.",
        treatment_duration: "Session: 30 mins. Daily home exercises.",
        expected_recovery: "Most recover within 3-6 months.",
        reference: "Clinical Practice Guidelines (Otolaryngology)",
        illustration: "/static/face.jpg",
    },
    SeedEntry {
        disease_name: "Diabetic Peripheral Neuropathy",
        keywords: "diabetes, numbness, foot pain, balance, burning feet, التهاب الأعصاب السكري",
        description: "Nerve damage caused by diabetes leading to loss of sensation.",
        estim: [
            "TENS / Infrared",
            "TENS: 80-100Hz. Infrared Anodyne Therapy.",
            "Electrodes placed along the dermatome of the leg/foot (e.g., L4, L5, S1) or surrounding painful area.",
            "Symptomatic pain relief and local circulation improvement.",
        ],
        ultrasound: [
            "Caution",
            "Use with extreme caution due to loss of sensation (Burn risk).",
            "Avoid if sensation is absent.",
        ],
        exercises: "1. Balance Training.\n2. Gait Training.\n3. Foot Care Education.\n4. Aerobic exercise.",
        treatment_duration: "Chronic management.",
        expected_recovery: "Strict glycemic control is key.",
        reference: "American Diabetes Association",
        illustration: "/static/neuropathy.jpg",
    },
    SeedEntry {
        disease_name: "CABG Rehabilitation (Open Heart)",
        keywords: "heart surgery, cardiac rehab, sternotomy, bypass, عملية قلب مفتوح",
        description: "Phase I to III rehab following Coronary Artery Bypass Graft.",
        estim: [
            "TENS (Sternal Pain)",
            "Conventional TENS. Freq 100Hz.",
            "Para-sternal region (avoid placing over heart directly/Pacemaker). Parallel to scar.",
            "Manage sternotomy pain to allow coughing/breathing.",
        ],
        ultrasound: [
            "Contraindicated over Chest",
            "Never use therapeutic US over the heart or pacemaker.",
            "N/A",
        ],
        exercises: "1. Deep Breathing & Incentive Spirometry.\n2. Sternal Precautions.\n3. Progressive walking program.",
        treatment_duration: "Phase 1: 1 week. Phase 2: 3-6 months.",
        expected_recovery: "Return to work: 6-12 weeks.",
        reference: "AACVPR Guidelines",
        illustration: "/static/cabg.jpg",
    },
    SeedEntry {
        disease_name: "ESRD & Hemodialysis Rehabilitation",
        keywords: "kidney failure, dialysis, fatigue, weakness, renal, الغسيل الكلوي",
        description: "Exercise training for patients undergoing hemodialysis.",
        estim: [
            "NMES (Intradialytic)",
            "Applied to Quads/Calves during dialysis. Freq: 30-50Hz.",
            "Large electrodes on Quadriceps muscle belly and/or Gastrocnemius.",
            "Prevent muscle wasting in sedentary dialysis patients.",
        ],
        ultrasound: [
            "N/A",
            "Not standard.",
            "N/A",
        ],
        exercises: "1. Intradialytic Cycling (Bed bike).\n2. Low intensity resistance training.\n3. Energy conservation.",
        treatment_duration: "Ongoing (3x/week during sessions).",
        expected_recovery: "Improves dialysis efficiency (Kt/V).",
        reference: "K/DOQI Guidelines",
        illustration: "/static/renal.jpg",
    },
    SeedEntry {
        disease_name: "Lymphedema Management",
        keywords: "swelling, lymph, mastectomy, arm swelling, edema, التورم الليمفاوي",
        description: "Chronic accumulation of protein-rich fluid usually after cancer surgery.",
        estim: [
            "Not Primary Treatment",
            "Electrical stimulation is rarely used. Focus is on CDT.",
            "N/A",
            "N/A",
        ],
        ultrasound: [
            "Contraindicated (Standard Thermal)",
            "Thermal US can increase lymph production. *Low Level Laser* is preferred.",
            "Avoid Thermal Ultrasound.",
        ],
        exercises: "1. Complex Decongestive Therapy (CDT).\n2. Manual Lymph Drainage (MLD).\n3. Compression Bandaging.\n4. Decongestive Exercises.",
        treatment_duration: "Intensive Phase: 2-4 weeks daily.",
        expected_recovery: "Condition is manageable but not curable.",
        reference: "International Society of Lymphology",
        illustration: "/static/lymph.jpg",
    },
    SeedEntry {
        disease_name: "Diastasis Recti (Post-Partum)",
        keywords: "abdominal separation, pregnancy, tummy, post natal, انفصال عضلات البطن",
        description: "Separation of the rectus abdominis muscles during/after pregnancy.",
        estim: [
            "NMES (Adjunct)",
            "Target: Rectus Abdominis. *Caution*.",
            "Bipolar placement on Rectus Abdominis bellies (avoid midline gap).",
            "Assist in recruitment of abdominal wall.",
        ],
        ultrasound: [
            "N/A",
            "Real-time Ultrasound Imaging is used for *Biofeedback*.",
            "Diagnosis and Biofeedback.",
        ],
        exercises: "1. Transverse Abdominis Activation.\n2. Pelvic Floor Kegels.\n3. Heel Slides with core brace.",
        treatment_duration: "8-12 weeks.",
        expected_recovery: "Surgery considered if gap > 2.5cm persists.",
        reference: "Women's Health PT Guidelines",
        illustration: "/static/diastasis.jpg",
    },
    SeedEntry {
        disease_name: "Labor Pain Management",
        keywords: "birth, delivery, labor, pain relief, pregnancy, الولادة",
        description: "Non-pharmacological pain relief during the first stage of labor.",
        estim: [
            "Obstetric TENS",
            "Burst (between contractions), High Freq 100Hz (during contraction).",
            "Paravertebral: T10-L1 (Upper) and S2-S4 (Lower).",
            "Significant pain reduction via Gate Control Mechanism.",
        ],
        ultrasound: [
            "N/A",
            "Not indicated.",
            "N/A",
        ],
        exercises: "1. Birthing ball exercises.\n2. Pelvic rocking.\n3. Breathing techniques.",
        treatment_duration: "Duration of labor.",
        expected_recovery: "Safe for mother and baby.",
        reference: "Cochrane Review on TENS",
        illustration: "/static/labor.jpg",
    },
    SeedEntry {
        disease_name: "Stress Urinary Incontinence",
        keywords: "leakage, pelvic floor, bladder, weakness, women health, سلس البول",
        description: "Involuntary leakage of urine during exertion.",
        estim: [
            "Vaginal/Anal Electrical Stimulation",
            "Freq: 50Hz. Time: 15-20 mins.",
            "Internal Probe (Vaginal or Anal).",
            "Strengthen pelvic floor muscles reflexively.",
        ],
        ultrasound: [
            "N/A",
            "N/A",
            "N/A",
        ],
        exercises: "1. Kegel Exercises (Fast flicks and Long holds).\n2. The \"Knack\" maneuver.\n3. Core strengthening.",
        treatment_duration: "3-6 months.",
        expected_recovery: "Success rate of conservative PT is >70%.",
        reference: "ICS Guidelines",
        illustration: "/static/pelvic.jpg",
    },
    SeedEntry {
        disease_name: "Osteoporosis & Fall Prevention",
        keywords: "bone density, fragile bones, elderly, fracture risk, هشاشة العظام",
        description: "Management of reduced bone density in elderly to prevent fractures.",
        estim: [
            "N/A",
            "Modalities used only for associated pain.",
            "N/A (Avoid spinal flexion/manipulation).",
            "N/A",
        ],
        ultrasound: [
            "Caution",
            "Avoid heavy manual pressure.",
            "N/A",
        ],
        exercises: "1. Weight-Bearing Exercises.\n2. Resistance Training.\n3. Balance Training (Tai Chi).\n4. Postural extension.",
        treatment_duration: "Lifelong.",
        expected_recovery: "Exercise can reduce fracture risk.",
        reference: "NOF Clinician's Guide",
        illustration: "/static/osteoporosis.jpg",
    },
    SeedEntry {
        disease_name: "Mechanical Low Back Pain",
        keywords: "lbp, back pain, lumbago, strain, stiffness, ألم أسفل الظهر",
        description: "General non-specific low back pain involving muscles/joints.",
        estim: [
            "TENS / IFC / Heat",
            "IFC: 4000Hz. TENS: 80-100Hz. Heat pack: 20 mins.",
            "Paravertebral muscles (Lumber region). 4 Electrodes (IFC) crossing pain center.",
            "Pain modulation to allow movement.",
        ],
        ultrasound: [
            "Indicated (Thermal)",
            "1 MHz, Continuous, 1.5 W/cm². Paraspinal muscles.",
            "Relax muscle spasm and increase blood flow.",
        ],
        exercises: "1. Cat-Camel stretch.\n2. Child's Pose.\n3. Bridging.\n4. Lumbar rotations.",
        treatment_duration: "4-6 weeks.",
        expected_recovery: "Encourage early return to activity.",
        reference: "ACP Guidelines for Low Back Pain",
        illustration: "/static/lbp.jpg",
    },
    SeedEntry {
        disease_name: "Plantar Fasciitis",
        keywords: "heel pain, foot pain, morning pain, arch pain, شوكة عظمية",
        description: "Inflammation of the thick band of tissue (plantar fascia) causing heel pain.",
        estim: [
            "Iontophoresis (if available) or TENS",
            "TENS: 100 Hz, Sensory level. Ionto: Dexamethasone, 40 mA-min.",
            "Placement: Medial calcaneal tubercle and arch (or bracket the heel).",
            "Short term pain relief.",
        ],
        ultrasound: [
            "Indicated (Pulsed or Continuous)",
            "3 MHz, 1.0-1.5 W/cm². Continuous for chronic cases. Time: 5-8 mins.",
            "Improve tissue extensibility before manual therapy or stretching.",
        ],
        exercises: "1. Plantar Fascia Stretch.\n2. Calf Stretching.\n3. Frozen Water Bottle Roll.\n4. Towel Curls.",
        treatment_duration: "Session: 40 mins. Home program essential.",
        expected_recovery: "Resolution can take 6-12 months.",
        reference: "JOSPT Clinical Guidelines",
        illustration: "/static/plantar.jpg",
    },
    SeedEntry {
        disease_name: "Carpal Tunnel Syndrome",
        keywords: "wrist pain, hand numbness, tingling fingers, cts, اختناق العصب",
        description: "Compression of the median nerve as it travels through the carpal tunnel in the wrist.",
        estim: [
            "TENS or Ultrasound",
            "TENS: 100 Hz, Sensory. No motor contraction.",
            "Placement: Over the carpal tunnel (wrist) and proximal forearm.",
            "Pain management only.",
        ],
        ultrasound: [
            "Indicated (Non-Thermal)",
            "Freq: 3 MHz. Duty Cycle: 20% (Pulsed). Intensity: 0.8 W/cm². Time: 5 mins.",
            "Reduce inflammation within the carpal tunnel.",
        ],
        exercises: "1. Median Nerve Gliding Exercises.\n2. Tendon Gliding Exercises.\n3. Wrist flexor stretching.",
        treatment_duration: "Session: 30 mins. Freq: 2/week.",
        expected_recovery: "Conservative management effective in mild-moderate cases.",
        reference: "APT Hand and Upper Extremity Guidelines",
        illustration: "/static/carpal.jpg",
    },
    SeedEntry {
        disease_name: "Patellofemoral Pain Syndrome (PFPS)",
        keywords: "knee pain, runner knee, anterior knee pain, chondromalacia, صابونة الركبة",
        description: "Pain around or behind the patella, aggravated by loading activities.",
        estim: [
            "NMES (VMO Strengthening)",
            "Target: Vastus Medialis Oblique (VMO). Freq: 50 Hz. Duty: 10/50.",
            "Placement: VMO Motor point and proximal thigh.",
            "Re-education of the VMO muscle to improve patellar tracking.",
        ],
        ultrasound: [
            "Not Primary Treatment",
            "Generally not effective for PFPS unless specifically targeting retinaculum tightness.",
            "Adjunct only.",
        ],
        exercises: "1. VMO Strengthening.\n2. Clamshells.\n3. Hip Abduction.\n4. IT Band Stretching.",
        treatment_duration: "Session: 45-60 mins. Focus on Hip/Core.",
        expected_recovery: "6-8 weeks of strengthening program required.",
        reference: "International Patellofemoral Research Consensus",
        illustration: "/static/pfps.jpg",
    },
];

/// The starter catalog, without ids.
pub fn catalog() -> Vec<ProtocolRecord> {
    CATALOG.iter().map(SeedEntry::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_are_complete() {
        let records = catalog();
        assert_eq!(records.len(), 27);

        for record in &records {
            assert!(record.id.is_none());
            assert!(!record.disease_name.trim().is_empty());
            assert!(!record.reference.trim().is_empty());
            assert!(!record.exercises.trim().is_empty());
        }
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<String> = catalog().into_iter().map(|r| r.disease_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_catalog_covers_neuro_and_womens_health() {
        let records = catalog();
        for needle in ["parkinson", "bell", "stroke", "incontinence", "diastasis", "lymphedema", "pfps"] {
            assert!(
                records.iter().any(|r| r.matches(needle)),
                "no catalog entry matches {needle}"
            );
        }
    }
}
