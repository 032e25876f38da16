#![cfg(feature = "gpu")]

use vecadd::{
    run_benchmark, BenchError, ComputeBackend, Config, HostBackend, InputVectors, OpenClBackend,
};

fn opencl_or_skip() -> Option<OpenClBackend> {
    let backend = OpenClBackend::new();
    match backend.enumerate_devices() {
        Ok(devices) if !devices.is_empty() => Some(backend),
        _ => {
            eprintln!("no OpenCL device available, skipping");
            None
        }
    }
}

#[test]
fn opencl_matches_host() {
    let Some(mut gpu) = opencl_or_skip() else {
        return;
    };
    let inputs = InputVectors::generate(100_000, 42);
    let config = Config {
        vector_len: 100_000,
        work_group_size: Some(1),
        ..Config::default()
    };
    let gpu_report = run_benchmark(&mut gpu, &config, &inputs).unwrap();
    let host_report = run_benchmark(&mut HostBackend::new(), &config, &inputs).unwrap();
    assert_eq!(gpu_report.result, host_report.result);
    gpu_report.verify(&inputs).unwrap();
}

#[test]
fn opencl_uneven_groups_cover_everything() {
    let Some(mut gpu) = opencl_or_skip() else {
        return;
    };
    let inputs = InputVectors::generate(1_000, 7);
    let config = Config {
        vector_len: 1_000,
        work_group_size: Some(32),
        ..Config::default()
    };
    match run_benchmark(&mut gpu, &config, &inputs) {
        Ok(report) => assert_eq!(report.result, inputs.expected_sum()),
        // some devices cap work-groups below 32
        Err(BenchError::InvalidConfiguration(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn opencl_rejects_broken_source() {
    let Some(mut gpu) = opencl_or_skip() else {
        return;
    };
    let device = gpu.enumerate_devices().unwrap().remove(0);
    let err = gpu
        .compile(&device, "__kernel void vector_add(__global int* a) { oops }")
        .err()
        .expect("build should fail");
    assert!(matches!(err, BenchError::Compile(_)));
}

#[test]
fn opencl_group_above_kernel_limit_is_invalid_configuration() {
    let Some(mut gpu) = opencl_or_skip() else {
        return;
    };
    let device = gpu.enumerate_devices().unwrap().remove(0);
    let kernel = gpu.compile(&device, vecadd::VECTOR_ADD_SRC).unwrap();
    let small = 8;
    let ones = vec![1; small];
    let limit = gpu.bind(&kernel, &ones, &ones).unwrap().max_work_group_size();

    let len = limit * 2;
    let ones = vec![1; len];
    let mut buffers = gpu.bind(&kernel, &ones, &ones).unwrap();
    let geometry = vecadd::LaunchGeometry::new(len, limit + 1).unwrap();
    assert!(matches!(
        gpu.dispatch(&kernel, &mut buffers, &geometry),
        Err(BenchError::InvalidConfiguration(_))
    ));
}
